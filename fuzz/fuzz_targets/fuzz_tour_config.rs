#![no_main]

use guidepost_core::{TourConfig, TourProgress};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for parsed in [TourConfig::from_toml_str(text), TourConfig::from_json_str(text)] {
        let Ok(config) = parsed else {
            continue;
        };
        let _ = config.validate();
        assert!(config.storage_key().ends_with(&format!("-v{}", config.version)));
        let total = config.steps.len();
        for (index, step) in config.steps.iter().enumerate() {
            let progress = TourProgress::compute(Some(index), total);
            assert!(progress.percentage <= 100);
            let _ = config.messages.step_message(progress, step);
            let _ = step.all_shortcuts();
        }
    }
});
