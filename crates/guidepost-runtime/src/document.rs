#![forbid(unsafe_code)]

//! Host page abstraction: the DOM operations a tour needs.
//!
//! A browser host implements [`Document`] over its real DOM; headless hosts
//! and tests use the in-memory implementation from `guidepost-harness`.

use std::fmt;

/// Attribute placed on the current target while it is highlighted.
pub const ACTIVE_ATTR: &str = "data-tour-active";

/// Attribute placed on a highlighted target whose overflow would clip a ring.
/// Presentation layers fall back to an outline highlight when it is present.
pub const OVERFLOW_ATTR: &str = "data-tour-overflow";

/// Selector matching every element currently marked as highlighted.
pub const ACTIVE_SELECTOR: &str = "[data-tour-active]";

/// Computed value of one CSS overflow property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    /// Parse a computed-style keyword. Unknown keywords read as `Visible`.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "hidden" => Self::Hidden,
            "clip" => Self::Clip,
            "scroll" => Self::Scroll,
            "auto" => Self::Auto,
            _ => Self::Visible,
        }
    }
}

/// The computed `overflow`, `overflow-x`, and `overflow-y` of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OverflowStyle {
    pub overflow: Overflow,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

impl OverflowStyle {
    /// The same value on every axis.
    #[must_use]
    pub const fn uniform(value: Overflow) -> Self {
        Self {
            overflow: value,
            overflow_x: value,
            overflow_y: value,
        }
    }

    /// Whether a ring drawn outside the element's box would be clipped.
    #[must_use]
    pub fn clips_ring(&self) -> bool {
        self.overflow == Overflow::Hidden
            || self.overflow_x == Overflow::Hidden
            || self.overflow_y == Overflow::Hidden
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollAlignment {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// Options for [`Document::scroll_into_view`], mirroring
/// `ScrollIntoViewOptions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollAlignment,
    pub inline: ScrollAlignment,
}

impl ScrollIntoViewOptions {
    /// Smooth scroll that centres the element on both axes.
    #[must_use]
    pub const fn smooth_center() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollAlignment::Center,
            inline: ScrollAlignment::Center,
        }
    }
}

/// DOM operations used by the controller and the built-in announcer.
///
/// Implementations are cheap handles onto shared page state (like a browser
/// `Document`): cloning shares the page, and every method takes `&self`.
///
/// Element handles do not own the element. A handle may outlive the element
/// it names; [`Document::is_connected`] reports whether it is still in the
/// page. Mutating an element that was removed from the page has no visible
/// effect.
pub trait Document {
    /// Non-owning element handle.
    type Element: Clone + PartialEq + fmt::Debug;

    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Element whose `id` attribute equals `id`.
    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Self::Element;

    /// Append `element` to the page body.
    fn append_to_body(&self, element: &Self::Element);

    /// Whether `element` is still part of the page.
    fn is_connected(&self, element: &Self::Element) -> bool;

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// Set one inline style property, e.g. `("position", "absolute")`.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn set_text_content(&self, element: &Self::Element, text: &str);

    /// Computed overflow styling of `element`.
    fn computed_overflow(&self, element: &Self::Element) -> OverflowStyle;

    fn scroll_into_view(&self, element: &Self::Element, options: ScrollIntoViewOptions);

    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Whether `element` can currently receive focus.
    fn is_focusable(&self, element: &Self::Element) -> bool;

    /// Move focus to `element`.
    fn focus(&self, element: &Self::Element);
}
