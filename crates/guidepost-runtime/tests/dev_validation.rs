//! Development-mode target checks and log output.

use std::rc::Rc;
use std::time::Duration;

use guidepost_harness::{
    MemoryDocument, RecordingAnnouncer, page_with_targets, sample_config, with_captured_tracing,
};
use guidepost_runtime::{
    KeyValueStore, MissingTarget, StorageError, StorageResult, TourController,
    UnavailableStorage, VALIDATION_DELAY, find_missing_targets,
};
use pretty_assertions::assert_eq;

fn controller(document: MemoryDocument, dev_mode: bool) -> TourController<MemoryDocument> {
    TourController::builder(sample_config(), document)
        .announcer(RecordingAnnouncer::new())
        .dev_mode(dev_mode)
        .build()
}

#[test]
fn missing_targets_listed_in_step_order() {
    let (document, _) = page_with_targets(&["search"]);
    let ctl = controller(document, false);
    assert_eq!(
        ctl.missing_targets(),
        vec![
            MissingTarget {
                step_id: "welcome".into(),
                selector: r#"[data-tour="welcome"]"#.into(),
            },
            MissingTarget {
                step_id: "settings".into(),
                selector: r#"[data-tour="settings"]"#.into(),
            },
        ]
    );
}

#[test]
fn mount_warns_after_delay_in_dev_mode() {
    let (document, _) = page_with_targets(&["welcome", "settings"]);
    let ((), logs) = with_captured_tracing(|| {
        let mut ctl = controller(document, true);
        ctl.mount();
        ctl.advance_time(VALIDATION_DELAY - Duration::from_millis(1));
        assert!(ctl.has_pending_effects());
        ctl.advance_time(Duration::from_millis(1));
        assert!(!ctl.has_pending_effects());
    });
    assert_eq!(
        logs.warnings(),
        vec![r#"Missing target for step "search": [data-tour="search"]"#]
    );
}

#[test]
fn mount_is_silent_outside_dev_mode() {
    let (document, _) = page_with_targets(&[]);
    let ((), logs) = with_captured_tracing(|| {
        let mut ctl = controller(document, false);
        ctl.mount();
        assert!(!ctl.has_pending_effects());
        ctl.advance_time(Duration::from_secs(5));
    });
    assert!(logs.warnings().is_empty());
}

#[test]
fn validation_reflects_page_at_fire_time() {
    let document = MemoryDocument::new();
    let ((), logs) = with_captured_tracing(|| {
        let mut ctl = controller(document.clone(), true);
        ctl.mount();
        for id in ["welcome", "search", "settings"] {
            document.insert_tour_target(id);
        }
        ctl.advance_time(VALIDATION_DELAY);
    });
    assert!(logs.warnings().is_empty());
}

#[test]
fn validation_does_not_touch_state() {
    let (document, _) = page_with_targets(&[]);
    let mut ctl = controller(document.clone(), true);
    let before = document.mutation_count();
    ctl.mount();
    ctl.advance_time(VALIDATION_DELAY);
    assert_eq!(document.mutation_count(), before);
    assert!(!ctl.is_active());
    assert_eq!(find_missing_targets(&document, ctl.steps()).len(), 3);
}

#[test]
fn unavailable_storage_is_logged_and_swallowed() {
    let (document, _) = page_with_targets(&[]);
    let ((), logs) = with_captured_tracing(|| {
        let mut ctl = TourController::builder(sample_config(), document)
            .storage(UnavailableStorage)
            .announcer(RecordingAnnouncer::new())
            .build();
        assert!(!ctl.has_completed_tour());
        ctl.complete();
        assert!(ctl.has_completed_tour());
    });
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("failed to read tour completion"));
    assert!(warnings[1].contains("failed to persist tour completion"));
}

/// Reads fine, fails every write.
struct ReadOnlyStore(Rc<std::cell::RefCell<u32>>);

impl KeyValueStore for ReadOnlyStore {
    fn name(&self) -> &str {
        "read-only"
    }

    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(Some("true".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        *self.0.borrow_mut() += 1;
        Err(StorageError::Unavailable("read-only".into()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        *self.0.borrow_mut() += 1;
        Err(StorageError::Unavailable("read-only".into()))
    }
}

#[test]
fn failed_writes_keep_in_memory_state() {
    let (document, _) = page_with_targets(&[]);
    let attempts = Rc::new(std::cell::RefCell::new(0));
    let mut ctl = TourController::builder(sample_config(), document)
        .storage(ReadOnlyStore(Rc::clone(&attempts)))
        .announcer(RecordingAnnouncer::new())
        .build();
    assert!(ctl.has_completed_tour());
    ctl.reset_completion();
    assert!(!ctl.has_completed_tour());
    ctl.mark_as_seen();
    assert!(ctl.has_completed_tour());
    assert_eq!(*attempts.borrow(), 2);
}

#[test]
fn transitions_logged_at_debug() {
    let (document, _) = page_with_targets(&[]);
    let ((), logs) = with_captured_tracing(|| {
        let mut ctl = controller(document, false);
        ctl.start();
        ctl.next();
    });
    let changes: Vec<_> = logs
        .events_at(tracing::Level::DEBUG)
        .into_iter()
        .filter(|e| e.message == "tour step changed")
        .map(|e| (e.fields["from"].clone(), e.fields["to"].clone()))
        .collect();
    assert_eq!(
        changes,
        vec![
            ("None".to_string(), "Some(0)".to_string()),
            ("Some(0)".to_string(), "Some(1)".to_string()),
        ]
    );
}
