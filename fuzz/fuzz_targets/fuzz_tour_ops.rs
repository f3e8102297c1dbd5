#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use guidepost_core::{KeyCode, KeyDown, TourConfig, TourStep};
use guidepost_harness::TourFixture;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Start,
    Next,
    Previous,
    GoTo(u8),
    Cancel,
    Complete,
    MarkSeen,
    Reset,
    Escape,
    ArrowRight,
    ArrowLeft,
    Frame,
    Advance(u16),
    AutoStart,
    Mount,
}

#[derive(Debug, Arbitrary)]
struct Input {
    steps: u8,
    present: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let len = usize::from(input.steps % 8);
    let ids: Vec<String> = (0..len).map(|i| format!("s{i}")).collect();
    let steps = ids
        .iter()
        .map(|id| TourStep::data_tour(id.clone(), id.clone(), "Body"))
        .collect();
    let present: Vec<&str> = ids
        .iter()
        .enumerate()
        .filter(|(i, _)| input.present & (1 << i) != 0)
        .map(|(_, id)| id.as_str())
        .collect();
    let mut fx = TourFixture::with_config(TourConfig::new(steps), &present);

    for op in input.ops.iter().take(256) {
        match op {
            Op::Start => fx.controller.start(),
            Op::Next => fx.controller.next(),
            Op::Previous => fx.controller.previous(),
            Op::GoTo(i) => fx.controller.go_to_step(usize::from(*i)),
            Op::Cancel => fx.controller.cancel(),
            Op::Complete => fx.controller.complete(),
            Op::MarkSeen => fx.controller.mark_as_seen(),
            Op::Reset => fx.controller.reset_completion(),
            Op::Escape => fx.controller.handle_keydown(&mut KeyDown::new(KeyCode::Escape)),
            Op::ArrowRight => fx.controller.handle_keydown(&mut KeyDown::new(KeyCode::Right)),
            Op::ArrowLeft => fx.controller.handle_keydown(&mut KeyDown::new(KeyCode::Left)),
            Op::Frame => fx.frame(),
            Op::Advance(ms) => fx.advance(Duration::from_millis(u64::from(*ms))),
            Op::AutoStart => {
                let _ = fx.controller.schedule_auto_start();
            }
            Op::Mount => fx.controller.mount(),
        }

        if let Some(index) = fx.controller.current_step_index() {
            assert!(index < len);
        }
        let marked = fx.highlighted();
        assert!(marked.len() <= 1);
        if !fx.controller.is_active() {
            assert!(marked.is_empty());
        }
        let progress = fx.controller.progress();
        assert!(progress.current <= progress.total && progress.percentage <= 100);
    }
});
