#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! [`TourConfig`] is the immutable input a host supplies once per tour. With
//! the `config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! version = 2
//! auto_start = true
//! auto_start_delay = 800          # milliseconds
//! storage_key_prefix = "sample-tour"
//!
//! [[steps]]
//! id = "nav-home"
//! target = '[data-tour="nav-home"]'
//! title = "Home"
//! content = "Navigate back to the home page."
//! ```
//!
//! Completion is persisted under [`TourConfig::storage_key`], which embeds the
//! version: bumping `version` makes every user see the tour again.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::intro::IntroSlide;
use crate::progress::TourProgress;
use crate::step::TourStep;

pub const DEFAULT_STORAGE_KEY_PREFIX: &str = "guided-tour";
pub const DEFAULT_AUTO_START_DELAY: Duration = Duration::from_millis(800);

const DEFAULT_CANCELLED: &str = "Tour cancelled. You can restart it anytime from the Tour button.";
const DEFAULT_COMPLETED: &str = "Tour complete!";
const DEFAULT_STEP_TEMPLATE: &str = "Tour step {current} of {total}: {title}. {content}";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Screen-reader messages announced by the controller.
///
/// `step` is a template; `{current}`, `{total}`, `{title}` and `{content}`
/// are substituted. Unknown placeholders are left as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourMessages {
    pub cancelled: String,
    pub completed: String,
    pub step: String,
}

impl Default for TourMessages {
    fn default() -> Self {
        Self {
            cancelled: DEFAULT_CANCELLED.to_string(),
            completed: DEFAULT_COMPLETED.to_string(),
            step: DEFAULT_STEP_TEMPLATE.to_string(),
        }
    }
}

impl TourMessages {
    /// Render the navigation announcement for `step`.
    #[must_use]
    pub fn step_message(&self, progress: TourProgress, step: &TourStep) -> String {
        let mut out = String::with_capacity(self.step.len() + step.title.len() + step.content.len());
        let mut rest = self.step.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find('}') else {
                out.push_str(after);
                return out;
            };
            let name = &after[1..close];
            match name {
                "current" => out.push_str(&progress.current.to_string()),
                "total" => out.push_str(&progress.total.to_string()),
                "title" => out.push_str(&step.title),
                "content" => out.push_str(&step.content),
                _ => out.push_str(&after[..=close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

// ---------------------------------------------------------------------------
// TourConfig
// ---------------------------------------------------------------------------

/// Immutable configuration for one tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourConfig {
    /// Tour version. Increment to force re-display.
    pub version: u32,
    /// Whether the host should start the tour for first-time users.
    pub auto_start: bool,
    /// Delay before an automatic start.
    #[cfg_attr(feature = "config", serde(with = "duration_ms"))]
    pub auto_start_delay: Duration,
    /// Storage key prefix; the key is `{prefix}-v{version}`.
    pub storage_key_prefix: String,
    /// Ordered steps. Order is navigation order.
    pub steps: Vec<TourStep>,
    pub messages: TourMessages,
    /// Optional welcome slides for the host to show before step one.
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Vec::is_empty"))]
    pub intro_slides: Vec<IntroSlide>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            version: 1,
            auto_start: true,
            auto_start_delay: DEFAULT_AUTO_START_DELAY,
            storage_key_prefix: DEFAULT_STORAGE_KEY_PREFIX.to_string(),
            steps: Vec::new(),
            messages: TourMessages::default(),
            intro_slides: Vec::new(),
        }
    }
}

impl TourConfig {
    /// Configuration with default settings and the given steps.
    #[must_use]
    pub fn new(steps: Vec<TourStep>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_storage_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_key_prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_auto_start(mut self, auto_start: bool, delay: Duration) -> Self {
        self.auto_start = auto_start;
        self.auto_start_delay = delay;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: TourMessages) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_intro_slides(mut self, slides: Vec<IntroSlide>) -> Self {
        self.intro_slides = slides;
        self
    }

    /// Key under which completion is persisted: `{prefix}-v{version}`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}-v{}", self.storage_key_prefix, self.version)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration for authoring mistakes.
    ///
    /// Returns a list of problems; empty means valid. Problems never block a
    /// tour from running: duplicate ids resolve to the first match and empty
    /// selectors simply never resolve.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.storage_key_prefix.trim().is_empty() {
            errors.push("storage_key_prefix must not be empty".into());
        }

        let mut seen = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                errors.push(format!("steps[{index}].id must not be empty"));
            } else if !seen.insert(step.id.as_str()) {
                errors.push(format!("steps[{index}].id \"{}\" is a duplicate", step.id));
            }
            if step.target.trim().is_empty() {
                errors.push(format!("steps[{index}].target must not be empty"));
            }
        }

        errors
    }

    /// Validate and return `self`, or every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

#[cfg(feature = "config")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`TourConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// The configuration parsed but failed validation.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid tour config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_steps() -> Vec<TourStep> {
        vec![
            TourStep::data_tour("a", "Alpha", "First"),
            TourStep::data_tour("b", "Beta", "Second"),
            TourStep::data_tour("c", "Gamma", "Third"),
        ]
    }

    #[test]
    fn defaults() {
        let config = TourConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.auto_start);
        assert_eq!(config.auto_start_delay, Duration::from_millis(800));
        assert_eq!(config.storage_key(), "guided-tour-v1");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn storage_key_embeds_version() {
        let v1 = TourConfig::new(three_steps()).with_storage_key_prefix("sample-tour");
        let v2 = v1.clone().with_version(2);
        assert_eq!(v1.storage_key(), "sample-tour-v1");
        assert_eq!(v2.storage_key(), "sample-tour-v2");
    }

    #[test]
    fn validate_reports_duplicates_and_empties() {
        let mut steps = three_steps();
        steps.push(TourStep::new("a", "", "Again", "dup"));
        steps.push(TourStep::new(" ", "#x", "Blank", "blank"));
        let config = TourConfig::new(steps).with_storage_key_prefix("");

        let errors = config.validate();
        assert_eq!(
            errors,
            vec![
                "storage_key_prefix must not be empty".to_string(),
                "steps[3].id \"a\" is a duplicate".to_string(),
                "steps[3].target must not be empty".to_string(),
                "steps[4].id must not be empty".to_string(),
            ]
        );
        assert!(matches!(
            config.validated(),
            Err(ConfigError::Invalid(list)) if list.len() == 4
        ));
    }

    #[test]
    fn step_message_substitutes_placeholders() {
        let messages = TourMessages::default();
        let step = TourStep::data_tour("a", "Alpha", "First step.");
        let msg = messages.step_message(TourProgress::compute(Some(0), 3), &step);
        assert_eq!(msg, "Tour step 1 of 3: Alpha. First step.");
    }

    #[test]
    fn step_message_does_not_expand_inside_values() {
        let messages = TourMessages {
            step: "{title} / {unknown} / {content".to_string(),
            ..TourMessages::default()
        };
        let step = TourStep::data_tour("a", "{content}", "body");
        let msg = messages.step_message(TourProgress::compute(Some(0), 1), &step);
        assert_eq!(msg, "{content} / {unknown} / {content");
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip_of_sample_config() {
        let toml_src = r##"
            version = 3
            auto_start = false
            auto_start_delay = 1200
            storage_key_prefix = "sample-tour"

            [[steps]]
            id = "nav-home"
            target = '[data-tour="nav-home"]'
            title = "Home"
            content = "Navigate back to the home page."
            icon = "i-heroicons-home"
            position = "bottom"

            [[steps]]
            id = "search"
            target = "#search"
            title = "Search"
            content = "Find anything."
            highlight = false
            align = "start"

            [[steps.shortcuts]]
            label = "Open search"
            mac = ["⌘", "K"]
            win = ["Ctrl", "K"]
        "##;

        let config = TourConfig::from_toml_str(toml_src).expect("parse toml");
        assert_eq!(config.version, 3);
        assert!(!config.auto_start);
        assert_eq!(config.auto_start_delay, Duration::from_millis(1200));
        assert_eq!(config.storage_key(), "sample-tour-v3");
        assert_eq!(config.steps.len(), 2);
        assert!(config.steps[0].highlight);
        assert!(!config.steps[1].highlight);
        assert_eq!(config.steps[1].align, crate::step::TourAlign::Start);
        assert_eq!(config.steps[1].shortcuts[0].win, vec!["Ctrl", "K"]);
        assert_eq!(config.messages, TourMessages::default());

        let json = serde_json::to_string(&config).expect("to json");
        let back = TourConfig::from_json_str(&json).expect("from json");
        assert_eq!(back, config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_parse_error_is_reported() {
        let err = TourConfig::from_json_str("{ not json").expect_err("must fail");
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = TourConfig::from_toml_file("/definitely/not/here/tour.toml")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
