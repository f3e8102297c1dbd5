#![forbid(unsafe_code)]

//! Keyboard events forwarded from the host page.
//!
//! The presentation layer translates its native key events into [`KeyDown`]
//! and hands them to the controller. The controller may call
//! [`KeyDown::prevent_default`]; the host then suppresses the browser
//! default for that event.

/// Key identity, following DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any other named key, kept verbatim.
    Named(String),
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Named(other.to_string()),
                }
            }
        }
    }
}

/// Tag names whose key presses belong to the control, not to tour navigation.
const INTERACTIVE_TAGS: [&str; 3] = ["INPUT", "BUTTON", "TEXTAREA"];

/// A key press on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDown {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Tag name of the element the event originated from, if known.
    pub target_tag: Option<String>,
    default_prevented: bool,
}

impl KeyDown {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            target_tag: None,
            default_prevented: false,
        }
    }

    /// Build from a DOM key name, e.g. `"ArrowRight"`.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        Self::new(KeyCode::from_dom_key(key))
    }

    /// Record the originating element's tag name.
    #[must_use]
    pub fn with_target(mut self, tag: impl Into<String>) -> Self {
        self.target_tag = Some(tag.into());
        self
    }

    /// Ask the host to suppress the default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether the event came from a text input, button, or text area.
    #[must_use]
    pub fn from_interactive_control(&self) -> bool {
        self.target_tag.as_deref().is_some_and(|tag| {
            INTERACTIVE_TAGS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(tag))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names_parse() {
        assert_eq!(KeyCode::from_dom_key("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), KeyCode::Right);
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_key("k"), KeyCode::Char('k'));
        assert_eq!(
            KeyCode::from_dom_key("F5"),
            KeyCode::Named("F5".to_string())
        );
    }

    #[test]
    fn interactive_targets_are_case_insensitive() {
        assert!(KeyDown::from_dom_key("ArrowRight")
            .with_target("input")
            .from_interactive_control());
        assert!(KeyDown::from_dom_key("ArrowRight")
            .with_target("TEXTAREA")
            .from_interactive_control());
        assert!(!KeyDown::from_dom_key("ArrowRight")
            .with_target("DIV")
            .from_interactive_control());
        assert!(!KeyDown::from_dom_key("ArrowRight").from_interactive_control());
    }

    #[test]
    fn prevent_default_sticks() {
        let mut event = KeyDown::new(KeyCode::Escape);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
