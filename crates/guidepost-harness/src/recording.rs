#![forbid(unsafe_code)]

//! Announcer that records instead of speaking.

use std::cell::RefCell;
use std::rc::Rc;

use guidepost_runtime::{Announcer, Politeness};

/// One recorded announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub politeness: Politeness,
}

/// Records every announcement. Clones share the log, so a test keeps one
/// handle and gives the other to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnnouncer {
    log: Rc<RefCell<Vec<Announcement>>>,
    frames: Rc<RefCell<u64>>,
}

impl RecordingAnnouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn announcements(&self) -> Vec<Announcement> {
        self.log.borrow().clone()
    }

    /// Recorded messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.log.borrow().iter().map(|a| a.message.clone()).collect()
    }

    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        self.log.borrow().last().map(|a| a.message.clone())
    }

    /// Frames observed through [`Announcer::on_frame`].
    #[must_use]
    pub fn frames_seen(&self) -> u64 {
        *self.frames.borrow()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, message: &str, politeness: Politeness) {
        self.log.borrow_mut().push(Announcement {
            message: message.to_string(),
            politeness,
        });
    }

    fn on_frame(&mut self) {
        *self.frames.borrow_mut() += 1;
    }
}
