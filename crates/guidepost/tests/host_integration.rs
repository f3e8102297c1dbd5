//! A host loading a tour from disk and persisting completion to a file.

use std::fs;

use guidepost::prelude::*;
use guidepost::{ConfigError, FileStorage, load_config};
use guidepost_harness::{RecordingAnnouncer, page_with_targets};
use pretty_assertions::assert_eq;

const TOUR_TOML: &str = r#"
version = 2
storage_key_prefix = "docs-tour"
auto_start_delay = 500

[messages]
completed = "All done."

[[steps]]
id = "sidebar"
target = '[data-tour="sidebar"]'
title = "Sidebar"
content = "Browse sections here."

[[steps]]
id = "search"
target = '[data-tour="search"]'
title = "Search"
content = "Jump anywhere."
"#;

#[test]
fn load_run_and_persist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("tour.toml");
    fs::write(&config_path, TOUR_TOML).expect("write config");
    let store_path = dir.path().join("state").join("tour.json");

    let config = load_config(&config_path).expect("valid config");
    assert_eq!(config.storage_key(), "docs-tour-v2");

    let (document, targets) = page_with_targets(&["sidebar", "search"]);
    let announcer = RecordingAnnouncer::new();
    let mut tour = TourController::builder(config.clone(), document)
        .storage(FileStorage::new(&store_path))
        .announcer(announcer.clone())
        .dev_mode(false)
        .build();
    assert!(tour.should_auto_start());

    tour.start();
    tour.on_animation_frame();
    tour.next();
    tour.on_animation_frame();
    assert_eq!(tour.current_step().map(|s| s.id.as_str()), Some("search"));
    tour.handle_keydown(&mut KeyDown::new(KeyCode::Right));
    assert!(!tour.is_active());
    assert_eq!(announcer.last_message().as_deref(), Some("All done."));
    assert_eq!(targets.len(), 2);

    let (document, _) = page_with_targets(&[]);
    let again = TourController::builder(config, document)
        .storage(FileStorage::new(&store_path))
        .announcer(RecordingAnnouncer::new())
        .build();
    assert!(again.has_completed_tour());
    assert!(!again.should_auto_start());
}

#[test]
fn json_config_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tour.JSON");
    fs::write(
        &path,
        r##"{"steps":[{"id":"a","target":"#a","title":"A","content":"First"}]}"##,
    )
    .expect("write config");
    let config = load_config(&path).expect("valid config");
    assert_eq!(config.steps.len(), 1);
    assert_eq!(config.storage_key(), "guided-tour-v1");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tour.toml");
    fs::write(
        &path,
        r##"
[[steps]]
id = "dup"
target = "#one"
title = "One"
content = "First"

[[steps]]
id = "dup"
target = "#two"
title = "Two"
content = "Second"
"##,
    )
    .expect("write config");

    match load_config(&path) {
        Err(Error::Config(ConfigError::Invalid(problems))) => {
            assert_eq!(problems.len(), 1);
            assert!(problems[0].contains("dup"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn corrupt_store_file_is_replaced_on_completion() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_path = dir.path().join("tours.json");
    fs::write(&store_path, "{ not json").expect("write corrupt store");
    let config = TourConfig::new(vec![TourStep::data_tour("a", "A", "First")]);

    let (document, _) = page_with_targets(&["a"]);
    let mut tour = TourController::builder(config.clone(), document)
        .storage(FileStorage::new(&store_path))
        .announcer(RecordingAnnouncer::new())
        .dev_mode(false)
        .build();
    assert!(!tour.has_completed_tour());
    tour.mark_as_seen();

    let (document, _) = page_with_targets(&[]);
    let again = TourController::builder(config, document)
        .storage(FileStorage::new(&store_path))
        .announcer(RecordingAnnouncer::new())
        .build();
    assert!(again.has_completed_tour());
}
