#![forbid(unsafe_code)]

//! Ready-made tours and pages.

use std::rc::Rc;
use std::time::Duration;

use guidepost_core::{TourConfig, TourStep};
use guidepost_runtime::{FOCUS_RESTORE_DELAY, MemoryStorage, TourController};

use crate::page::{MemoryDocument, NodeId};
use crate::recording::RecordingAnnouncer;

/// Ids of the steps in [`sample_steps`].
pub const SAMPLE_STEP_IDS: [&str; 3] = ["welcome", "search", "settings"];

/// Three `data-tour` steps: welcome, search, settings.
#[must_use]
pub fn sample_steps() -> Vec<TourStep> {
    vec![
        TourStep::data_tour("welcome", "Welcome", "This is your dashboard."),
        TourStep::data_tour("search", "Search", "Find anything from here.")
            .with_tip("Press / to focus search."),
        TourStep::data_tour("settings", "Settings", "Adjust your preferences."),
    ]
}

#[must_use]
pub fn sample_config() -> TourConfig {
    TourConfig::new(sample_steps())
}

/// A page carrying one `data-tour` target per id, in order.
#[must_use]
pub fn page_with_targets(ids: &[&str]) -> (MemoryDocument, Vec<NodeId>) {
    let document = MemoryDocument::new();
    let targets = ids
        .iter()
        .map(|id| document.insert_tour_target(id))
        .collect();
    (document, targets)
}

/// A controller wired to an in-memory page, a recording announcer, and
/// shared memory storage, with handles kept for assertions.
#[derive(Debug)]
pub struct TourFixture {
    pub document: MemoryDocument,
    pub announcer: RecordingAnnouncer,
    pub storage: Rc<MemoryStorage>,
    pub targets: Vec<NodeId>,
    pub controller: TourController<MemoryDocument>,
}

impl TourFixture {
    /// The sample tour on a page with all of its targets.
    #[must_use]
    pub fn sample() -> Self {
        Self::with_config(sample_config(), &SAMPLE_STEP_IDS)
    }

    /// `config` on a page carrying targets for `target_ids`.
    #[must_use]
    pub fn with_config(config: TourConfig, target_ids: &[&str]) -> Self {
        Self::with_storage(config, target_ids, Rc::new(MemoryStorage::new()))
    }

    /// Like [`with_config`](Self::with_config), persisting to `storage`.
    #[must_use]
    pub fn with_storage(
        config: TourConfig,
        target_ids: &[&str],
        storage: Rc<MemoryStorage>,
    ) -> Self {
        let (document, targets) = page_with_targets(target_ids);
        let announcer = RecordingAnnouncer::new();
        let controller = TourController::builder(config, document.clone())
            .storage(Rc::clone(&storage))
            .announcer(announcer.clone())
            .dev_mode(false)
            .build();
        Self {
            document,
            announcer,
            storage,
            targets,
            controller,
        }
    }

    /// Run one animation frame.
    pub fn frame(&mut self) {
        self.controller.on_animation_frame();
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance_time(dt);
    }

    /// Run a frame, then let the focus-restore delay elapse.
    pub fn settle(&mut self) {
        self.frame();
        self.advance(FOCUS_RESTORE_DELAY);
    }

    /// Elements currently marked as highlighted.
    #[must_use]
    pub fn highlighted(&self) -> Vec<NodeId> {
        self.document.select_all(guidepost_runtime::ACTIVE_SELECTOR)
    }
}
