#![forbid(unsafe_code)]

//! Guidepost runtime: the guided tour state machine and its page effects.
//!
//! # Role in Guidepost
//! `guidepost-runtime` owns everything that changes over time: the
//! [`TourController`] state machine, the host-driven [`Scheduler`] that defers
//! highlight and focus work, the [`Announcer`] that speaks steps to assistive
//! technology, and the [`KeyValueStore`] that remembers completion across
//! sessions.
//!
//! # How it fits in the system
//! The host owns the event loop. It forwards key presses to
//! [`TourController::handle_keydown`], calls
//! [`TourController::on_animation_frame`] once per rendered frame, and
//! [`TourController::advance_time`] as its clock moves. Page access goes
//! through the [`Document`] trait; `guidepost-harness` supplies an in-memory
//! page for tests and headless hosts.
//!
//! # Feature Flags
//!
//! - `config`: TOML/JSON loading for [`TourConfig`].
//! - `state-persistence`: the JSON-file [`FileStorage`] backend.

pub mod announcer;
pub mod controller;
pub mod document;
pub mod observable;
pub mod scheduler;
pub mod storage;
pub mod validation;

pub use announcer::{
    Announcer, FnAnnouncer, LIVE_REGION_ID, LiveRegionAnnouncer, Politeness, announce_with,
};
pub use controller::{
    FOCUS_RESTORE_DELAY, TourController, TourControllerBuilder, TourEnding, TourTask,
    VALIDATION_DELAY,
};
pub use document::{
    ACTIVE_ATTR, ACTIVE_SELECTOR, Document, OVERFLOW_ATTR, Overflow, OverflowStyle,
    ScrollAlignment, ScrollBehavior, ScrollIntoViewOptions,
};
pub use observable::{Observable, Subscription};
pub use scheduler::{DeterministicClock, Scheduler};
#[cfg(feature = "state-persistence")]
pub use storage::FileStorage;
pub use storage::{
    KeyValueStore, MemoryStorage, StorageError, StorageResult, UnavailableStorage,
};
pub use validation::{MissingTarget, find_missing_targets, warn_missing_targets};

pub use guidepost_core::{
    ConfigError, IntroSlide, KeyCode, KeyDown, Shortcut, TourAlign, TourConfig, TourMessages,
    TourPosition, TourProgress, TourStep,
};
