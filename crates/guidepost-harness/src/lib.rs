#![forbid(unsafe_code)]

//! Test harness for Guidepost tours.
//!
//! - [`MemoryDocument`]: an in-memory page implementing
//!   [`guidepost_runtime::Document`], with a small selector engine.
//! - [`RecordingAnnouncer`]: an announcer that keeps what it was asked to say.
//! - [`with_captured_tracing`]: capture log output for assertions.
//! - [`TourFixture`]: a controller wired to all of the above.

pub mod capture;
pub mod fixtures;
pub mod page;
pub mod recording;
pub mod selector;

pub use capture::{CaptureHandle, CapturedEvent, CapturedSpan, with_captured_tracing};
pub use fixtures::{
    SAMPLE_STEP_IDS, TourFixture, page_with_targets, sample_config, sample_steps,
};
pub use page::{MemoryDocument, NodeId, ScrollRecord, TextWrite};
pub use recording::{Announcement, RecordingAnnouncer};
pub use selector::SelectorList;
