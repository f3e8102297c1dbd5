#![forbid(unsafe_code)]

//! Guidepost public facade crate.
//!
//! Guidepost drives an accessible, keyboard-navigable guided tour over a host
//! page. This crate re-exports the stable surface of `guidepost-core` and
//! `guidepost-runtime` and offers a prelude for day-to-day use.
//!
//! ```ignore
//! use guidepost::prelude::*;
//!
//! let config = TourConfig::new(vec![
//!     TourStep::data_tour("search", "Search", "Find anything from here."),
//! ]);
//! let mut tour = TourController::builder(config, page).build();
//! tour.start();
//! tour.on_animation_frame();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use guidepost_core::{
    ConfigError, IntroSlide, IntroSlideBenefit, IntroSlideCallout, IntroSlideConversion,
    IntroSlideExample, KeyCode, KeyDown, Shortcut, TourAlign, TourConfig, TourMessages,
    TourPosition, TourProgress, TourStep,
};

// --- Runtime re-exports ----------------------------------------------------

pub use guidepost_runtime::{
    ACTIVE_ATTR, ACTIVE_SELECTOR, Announcer, Document, FOCUS_RESTORE_DELAY, KeyValueStore,
    LIVE_REGION_ID, LiveRegionAnnouncer, MemoryStorage, MissingTarget, OVERFLOW_ATTR, Observable,
    OverflowStyle, Politeness, ScrollIntoViewOptions, StorageError, Subscription, TourController,
    TourControllerBuilder, UnavailableStorage, VALIDATION_DELAY, announce_with,
};

#[cfg(feature = "state-persistence")]
pub use guidepost_runtime::FileStorage;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Guidepost hosts.
#[derive(Debug)]
pub enum Error {
    /// Tour configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Guidepost APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Loading --------------------------------------------------------------

/// Load and validate a tour configuration, choosing the format by extension.
///
/// `.json` files are read as JSON; anything else as TOML.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<TourConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        TourConfig::from_json_file(path)?
    } else {
        TourConfig::from_toml_file(path)?
    };
    tracing::debug!(
        path = %path.display(),
        steps = config.steps.len(),
        "loaded tour configuration"
    );
    Ok(config.validated()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Announcer, Document, Error, KeyCode, KeyDown, KeyValueStore, MemoryStorage, Politeness,
        Result, TourConfig, TourController, TourProgress, TourStep,
    };

    pub use crate::{core, runtime};
}

pub use guidepost_core as core;
pub use guidepost_runtime as runtime;
