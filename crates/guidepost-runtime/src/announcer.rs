#![forbid(unsafe_code)]

//! Screen-reader announcements through an ARIA live region.
//!
//! # Design
//!
//! Assistive technology only re-reads a live region when its text changes,
//! so each announcement clears the region immediately and writes the new
//! text on the following frame. Announcing the same message twice in a row
//! therefore still produces two announcements.
//!
//! The region is a page-wide singleton found by [`LIVE_REGION_ID`]. It is
//! created on first use and reused afterwards, including by other
//! controllers on the same page.
//!
//! # Invariants
//!
//! 1. At most one live-region element with [`LIVE_REGION_ID`] is created per
//!    page by this module.
//! 2. A pending write is superseded by the next `announce()`; there is no
//!    queue.
//! 3. `aria-live` always reflects the priority of the latest call.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::document::Document;

/// Fixed id of the shared live-region element.
pub const LIVE_REGION_ID: &str = "guidepost-tour-announcer";

/// Live-region priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Politeness {
    /// Announced when the user is idle.
    #[default]
    Polite,
    /// Announced immediately, interrupting current speech.
    Assertive,
}

impl Politeness {
    /// Value for the `aria-live` attribute.
    #[must_use]
    pub const fn as_aria_live(self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Delivers messages to assistive technology.
///
/// A custom implementation supplied to the controller builder fully replaces
/// the built-in [`LiveRegionAnnouncer`].
pub trait Announcer {
    /// Announce `message` once.
    fn announce(&mut self, message: &str, politeness: Politeness);

    /// Called at the start of every animation frame, before the controller's
    /// own frame work. Implementations that defer writes flush them here.
    fn on_frame(&mut self) {}
}

/// Adapter turning a closure into an [`Announcer`].
pub struct FnAnnouncer<F>(F);

/// Wrap `f` as an [`Announcer`].
pub fn announce_with<F: FnMut(&str, Politeness)>(f: F) -> FnAnnouncer<F> {
    FnAnnouncer(f)
}

impl<F: FnMut(&str, Politeness)> Announcer for FnAnnouncer<F> {
    fn announce(&mut self, message: &str, politeness: Politeness) {
        (self.0)(message, politeness);
    }
}

impl<F> fmt::Debug for FnAnnouncer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAnnouncer").finish_non_exhaustive()
    }
}

impl<A: Announcer + ?Sized> Announcer for Rc<RefCell<A>> {
    fn announce(&mut self, message: &str, politeness: Politeness) {
        self.borrow_mut().announce(message, politeness);
    }

    fn on_frame(&mut self) {
        self.borrow_mut().on_frame();
    }
}

/// Built-in announcer writing to a visually hidden `role="status"` region.
pub struct LiveRegionAnnouncer<D: Document> {
    document: D,
    region: Option<D::Element>,
    pending: Option<(D::Element, String)>,
}

impl<D: Document> LiveRegionAnnouncer<D> {
    /// Create an announcer. The region is not touched until the first call.
    #[must_use]
    pub fn new(document: D) -> Self {
        Self {
            document,
            region: None,
            pending: None,
        }
    }

    /// Whether a write is waiting for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn region(&mut self) -> D::Element {
        if let Some(el) = &self.region {
            if self.document.is_connected(el) {
                return el.clone();
            }
        }

        if let Some(el) = self.document.get_element_by_id(LIVE_REGION_ID) {
            trace!("reusing existing live region");
            self.region = Some(el.clone());
            return el;
        }

        let el = self.document.create_element("div");
        let doc = &self.document;
        doc.set_attribute(&el, "id", LIVE_REGION_ID);
        doc.set_attribute(&el, "aria-live", Politeness::Polite.as_aria_live());
        doc.set_attribute(&el, "aria-atomic", "true");
        doc.set_attribute(&el, "role", "status");
        // Visually hidden but still in the accessibility tree.
        for (property, value) in [
            ("position", "absolute"),
            ("width", "1px"),
            ("height", "1px"),
            ("padding", "0"),
            ("margin", "-1px"),
            ("overflow", "hidden"),
            ("clip", "rect(0, 0, 0, 0)"),
            ("white-space", "nowrap"),
            ("border", "0"),
        ] {
            doc.set_style(&el, property, value);
        }
        doc.append_to_body(&el);
        trace!("created live region");
        self.region = Some(el.clone());
        el
    }
}

impl<D: Document> Announcer for LiveRegionAnnouncer<D> {
    fn announce(&mut self, message: &str, politeness: Politeness) {
        let region = self.region();
        self.document
            .set_attribute(&region, "aria-live", politeness.as_aria_live());
        self.document.set_text_content(&region, "");
        trace!(politeness = politeness.as_aria_live(), "announcement queued");
        self.pending = Some((region, message.to_string()));
    }

    fn on_frame(&mut self) {
        if let Some((region, message)) = self.pending.take() {
            self.document.set_text_content(&region, &message);
        }
    }
}

impl<D: Document> fmt::Debug for LiveRegionAnnouncer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveRegionAnnouncer")
            .field("region", &self.region)
            .field("pending", &self.pending.as_ref().map(|(_, m)| m))
            .finish()
    }
}
