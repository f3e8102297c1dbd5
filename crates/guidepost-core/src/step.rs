#![forbid(unsafe_code)]

//! Tour step definitions.
//!
//! A [`TourStep`] names one target element by selector and carries the text
//! shown for it. Everything except `target`, `title`, `content` and
//! `highlight` is display payload: the controller passes it through to the
//! presentation layer and never inspects it.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Popover position relative to the target element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum TourPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Popover alignment along the position axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum TourAlign {
    Start,
    #[default]
    Center,
    End,
}

/// A keyboard shortcut hint shown alongside a step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct Shortcut {
    pub label: String,
    /// Key caps on macOS, e.g. `["⌘", "K"]`.
    #[cfg_attr(feature = "config", serde(default))]
    pub mac: Vec<String>,
    /// Key caps everywhere else, e.g. `["Ctrl", "K"]`.
    #[cfg_attr(feature = "config", serde(default))]
    pub win: Vec<String>,
}

impl Shortcut {
    #[must_use]
    pub fn new<I, J, S, T>(label: impl Into<String>, mac: I, win: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            label: label.into(),
            mac: mac.into_iter().map(Into::into).collect(),
            win: win.into_iter().map(Into::into).collect(),
        }
    }
}

/// One unit of the tour: a target element plus display text and hints.
///
/// Steps are immutable once handed to a controller. Within one sequence the
/// `id` must be unique; lookups by id return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct TourStep {
    /// Identifier, unique within the sequence.
    pub id: String,
    /// Selector resolving to the target element, typically `[data-tour="id"]`.
    pub target: String,
    /// Popover heading; also the first half of the announcement.
    pub title: String,
    /// Body text; also the second half of the announcement.
    pub content: String,
    /// Optional extra tip or warning.
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub tip: Option<String>,
    #[cfg_attr(feature = "config", serde(default))]
    pub position: TourPosition,
    #[cfg_attr(feature = "config", serde(default))]
    pub align: TourAlign,
    /// Whether the target gets the highlight ring. Defaults to `true`.
    #[cfg_attr(feature = "config", serde(default = "default_highlight"))]
    pub highlight: bool,
    /// Icon name in the host's icon set.
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub icon: Option<String>,
    /// Single shortcut hint (macOS keys). Superseded by `shortcuts`.
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub shortcut: Vec<String>,
    /// Single shortcut hint (other platforms). Superseded by `shortcuts`.
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub shortcut_win: Vec<String>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub shortcuts: Vec<Shortcut>,
}

#[cfg(feature = "config")]
const fn default_highlight() -> bool {
    true
}

impl TourStep {
    /// Create a step with default hints (bottom/center, highlighted).
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        target: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            title: title.into(),
            content: content.into(),
            tip: None,
            position: TourPosition::default(),
            align: TourAlign::default(),
            highlight: true,
            icon: None,
            shortcut: Vec::new(),
            shortcut_win: Vec::new(),
            shortcuts: Vec::new(),
        }
    }

    /// Create a step targeting `[data-tour="{id}"]`, the usual convention.
    #[must_use]
    pub fn data_tour(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let target = format!("[data-tour=\"{id}\"]");
        Self::new(id, target, title, content)
    }

    #[must_use]
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: TourPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn with_align(mut self, align: TourAlign) -> Self {
        self.align = align;
        self
    }

    /// Skip the highlight ring for this step only.
    #[must_use]
    pub const fn without_highlight(mut self) -> Self {
        self.highlight = false;
        self
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    /// All shortcut hints, folding the legacy single-shortcut fields into
    /// the list form.
    #[must_use]
    pub fn all_shortcuts(&self) -> Vec<Shortcut> {
        let mut out = Vec::with_capacity(self.shortcuts.len() + 1);
        if !self.shortcut.is_empty() || !self.shortcut_win.is_empty() {
            let win = if self.shortcut_win.is_empty() {
                self.shortcut.clone()
            } else {
                self.shortcut_win.clone()
            };
            out.push(Shortcut {
                label: String::new(),
                mac: self.shortcut.clone(),
                win,
            });
        }
        out.extend(self.shortcuts.iter().cloned());
        out
    }
}
