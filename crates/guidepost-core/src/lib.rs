#![forbid(unsafe_code)]

//! Guidepost core types.
//!
//! This crate holds the data a guided tour is built from: the ordered
//! [`TourStep`] list, the immutable [`TourConfig`], the derived
//! [`TourProgress`], and the [`KeyDown`] events a host forwards for keyboard
//! navigation. It has no behaviour of its own; the state machine lives in
//! `guidepost-runtime`.
//!
//! # Feature Flags
//!
//! - `config`: serde derives plus TOML/JSON loading for [`TourConfig`].

pub mod config;
pub mod event;
pub mod intro;
pub mod progress;
pub mod step;

pub use config::{ConfigError, TourConfig, TourMessages};
pub use event::{KeyCode, KeyDown};
pub use intro::{
    IntroSlide, IntroSlideBenefit, IntroSlideCallout, IntroSlideConversion, IntroSlideExample,
};
pub use progress::TourProgress;
pub use step::{Shortcut, TourAlign, TourPosition, TourStep};
