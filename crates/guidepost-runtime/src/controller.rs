#![forbid(unsafe_code)]

//! Guided tour state machine.
//!
//! A [`TourController`] walks a user through a fixed, ordered list of
//! [`TourStep`]s. It owns the session state (current index, completion flag,
//! the element to return focus to) and drives the page side effects through
//! a [`Document`]: marking the current target, scrolling it into view,
//! announcing it, and restoring focus when the tour ends.
//!
//! # States
//!
//! ```text
//!             start / next / go_to_step
//!   Inactive ───────────────────────────▶ Active(i)
//!      ▲                                     │ next / previous / go_to_step
//!      │        cancel / complete /          ▼
//!      └──────── next on last step ────── Active(j)
//! ```
//!
//! Completion and cancellation both return to `Inactive`; they differ only
//! in the message announced.
//!
//! # Deferred effects
//!
//! Highlighting and announcing a step wait for the next animation frame, so
//! the host has rendered the state change first. Focus restoration waits
//! [`FOCUS_RESTORE_DELAY`]. The host drives both through
//! [`TourController::on_animation_frame`] and
//! [`TourController::advance_time`]. Deferred effects read the index when
//! they run and at most one reveal is queued, so a later transition
//! supersedes an earlier one.
//!
//! # Sharing a page
//!
//! Highlight clearing removes the markers from every marked element, not
//! just the one this controller marked, and the live region is shared by id.
//! Two controllers active on one page at once is unsupported: each may clear
//! the other's highlight.

use std::fmt;
use std::time::Duration;

use guidepost_core::{KeyCode, KeyDown, TourConfig, TourProgress, TourStep};
use tracing::{debug, trace, warn};

use crate::announcer::{Announcer, LiveRegionAnnouncer, Politeness};
use crate::document::{ACTIVE_ATTR, ACTIVE_SELECTOR, Document, OVERFLOW_ATTR, ScrollIntoViewOptions};
use crate::observable::{Observable, Subscription};
use crate::scheduler::Scheduler;
use crate::storage::{KeyValueStore, MemoryStorage};
use crate::validation::{MissingTarget, find_missing_targets, warn_missing_targets};

/// Delay between the tour closing and focus returning to its origin.
pub const FOCUS_RESTORE_DELAY: Duration = Duration::from_millis(50);

/// Delay between [`TourController::mount`] and the development target check.
pub const VALIDATION_DELAY: Duration = Duration::from_millis(1000);

const COMPLETED_VALUE: &str = "true";

/// Work deferred to a later frame or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourTask {
    /// Highlight and announce whatever step is current when this runs.
    RevealStep,
    /// Return focus to the element captured at `start()`.
    RestoreFocus,
    /// Warn about steps whose targets are missing.
    ValidateTargets,
    /// Start the tour unless it was completed or started meanwhile.
    AutoStart,
}

/// How an active tour ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEnding {
    Cancelled,
    Completed,
}

/// Builder for [`TourController`].
pub struct TourControllerBuilder<D: Document> {
    config: TourConfig,
    document: D,
    storage: Option<Box<dyn KeyValueStore>>,
    announcer: Option<Box<dyn Announcer>>,
    dev_mode: bool,
}

impl<D: Document + Clone + 'static> TourControllerBuilder<D> {
    /// Persist completion in `storage`. Without one, completion lives in
    /// memory for the lifetime of the controller.
    #[must_use]
    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Replace the built-in live-region announcer.
    #[must_use]
    pub fn announcer(mut self, announcer: impl Announcer + 'static) -> Self {
        self.announcer = Some(Box::new(announcer));
        self
    }

    /// Enable development diagnostics. Defaults to `cfg!(debug_assertions)`.
    #[must_use]
    pub const fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> TourController<D> {
        let storage_key = self.config.storage_key();
        let storage = self.storage.unwrap_or_else(|| {
            debug!("no storage configured, completion is kept in memory");
            Box::new(MemoryStorage::new())
        });
        let announcer = match self.announcer {
            Some(custom) => custom,
            None => Box::new(LiveRegionAnnouncer::new(self.document.clone())),
        };
        let completed = read_completion(storage.as_ref(), &storage_key);
        debug!(
            key = %storage_key,
            completed,
            steps = self.config.steps.len(),
            "tour controller created"
        );

        TourController {
            config: self.config,
            document: self.document,
            storage,
            announcer,
            storage_key,
            current_index: Observable::new(None),
            has_completed: Observable::new(completed),
            previously_focused: None,
            scheduler: Scheduler::new(),
            dev_mode: self.dev_mode,
        }
    }
}

/// Single-tour state machine. See the [module docs](self).
pub struct TourController<D: Document> {
    config: TourConfig,
    document: D,
    storage: Box<dyn KeyValueStore>,
    announcer: Box<dyn Announcer>,
    storage_key: String,
    current_index: Observable<Option<usize>>,
    has_completed: Observable<bool>,
    previously_focused: Option<D::Element>,
    scheduler: Scheduler<TourTask>,
    dev_mode: bool,
}

impl<D: Document + Clone + 'static> TourController<D> {
    /// Start building a controller for `config` on `document`.
    #[must_use]
    pub fn builder(config: TourConfig, document: D) -> TourControllerBuilder<D> {
        TourControllerBuilder {
            config,
            document,
            storage: None,
            announcer: None,
            dev_mode: cfg!(debug_assertions),
        }
    }

    /// Controller with in-memory storage and the built-in announcer.
    #[must_use]
    pub fn new(config: TourConfig, document: D) -> Self {
        Self::builder(config, document).build()
    }

    // --- Accessors ---------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    #[must_use]
    pub fn steps(&self) -> &[TourStep] {
        &self.config.steps
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Key under which completion is persisted.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Current step index, `None` while inactive.
    #[must_use]
    pub fn current_step_index(&self) -> Option<usize> {
        self.current_index.get()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_index.get().is_some()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&TourStep> {
        self.current_index
            .get()
            .and_then(|index| self.config.steps.get(index))
    }

    #[must_use]
    pub fn progress(&self) -> TourProgress {
        TourProgress::compute(self.current_index.get(), self.config.steps.len())
    }

    #[must_use]
    pub fn has_completed_tour(&self) -> bool {
        self.has_completed.get()
    }

    /// First step with `id`.
    #[must_use]
    pub fn get_step_by_id(&self, id: &str) -> Option<&TourStep> {
        self.config.steps.iter().find(|step| step.id == id)
    }

    /// Index of the first step with `id`.
    #[must_use]
    pub fn get_step_index(&self, id: &str) -> Option<usize> {
        self.config.steps.iter().position(|step| step.id == id)
    }

    /// Observable handle on the step index, for presentation bindings.
    #[must_use]
    pub fn step_index_observable(&self) -> Observable<Option<usize>> {
        self.current_index.clone()
    }

    /// Observable handle on the completion flag.
    #[must_use]
    pub fn completion_observable(&self) -> Observable<bool> {
        self.has_completed.clone()
    }

    /// Call `callback` with the new index on every index change.
    pub fn subscribe_step_index(
        &self,
        callback: impl Fn(&Option<usize>) + 'static,
    ) -> Subscription {
        self.current_index.subscribe(callback)
    }

    /// Call `callback` with the new flag on every completion change.
    pub fn subscribe_completion(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.has_completed.subscribe(callback)
    }

    /// Whether deferred work is waiting for a frame or timer.
    #[must_use]
    pub fn has_pending_effects(&self) -> bool {
        !self.scheduler.is_idle()
    }

    // --- Transitions -------------------------------------------------------

    /// Begin the tour at step 0, remembering the focused element.
    ///
    /// Restarting an active tour jumps back to step 0. A tour without steps
    /// cannot start.
    pub fn start(&mut self) {
        if self.config.steps.is_empty() {
            debug!("start ignored: tour has no steps");
            return;
        }
        self.clear_highlight();
        self.previously_focused = self.document.active_element();
        self.set_index(Some(0));
        self.request_reveal();
    }

    /// Advance one step, completing the tour from the last step.
    ///
    /// From `Inactive` this enters step 0 without capturing focus.
    pub fn next(&mut self) {
        self.clear_highlight();
        let next = self.current_index.get().map_or(0, |index| index + 1);
        if next < self.config.steps.len() {
            self.set_index(Some(next));
            self.request_reveal();
        } else {
            self.complete();
        }
    }

    /// Go back one step. No-op on the first step or while inactive.
    pub fn previous(&mut self) {
        match self.current_index.get() {
            Some(index) if index > 0 => {
                self.clear_highlight();
                self.set_index(Some(index - 1));
                self.request_reveal();
            }
            _ => trace!("previous ignored: no earlier step"),
        }
    }

    /// Jump to `index`. Out-of-range requests are ignored.
    pub fn go_to_step(&mut self, index: usize) {
        if index >= self.config.steps.len() {
            debug!(
                index,
                steps = self.config.steps.len(),
                "go_to_step ignored: out of range"
            );
            return;
        }
        self.clear_highlight();
        self.set_index(Some(index));
        self.request_reveal();
    }

    /// End the tour early. Still marks it as seen.
    pub fn cancel(&mut self) {
        self.finish(TourEnding::Cancelled);
    }

    /// End the tour after the last step.
    pub fn complete(&mut self) {
        self.finish(TourEnding::Completed);
    }

    fn finish(&mut self, ending: TourEnding) {
        self.clear_highlight();
        self.mark_as_seen();
        self.set_index(None);
        self.scheduler
            .cancel_where(|task| *task == TourTask::RestoreFocus);
        if self.previously_focused.is_some() {
            self.scheduler
                .set_timeout(FOCUS_RESTORE_DELAY, TourTask::RestoreFocus);
        }
        let message = match ending {
            TourEnding::Cancelled => &self.config.messages.cancelled,
            TourEnding::Completed => &self.config.messages.completed,
        };
        debug!(?ending, "tour finished");
        self.announcer.announce(message, Politeness::Polite);
    }

    /// Record the tour as seen without touching the session.
    pub fn mark_as_seen(&mut self) {
        self.has_completed.set(true);
        if let Err(err) = self.storage.set(&self.storage_key, COMPLETED_VALUE) {
            warn!(
                key = %self.storage_key,
                backend = self.storage.name(),
                error = %err,
                "failed to persist tour completion; keeping it for this session only"
            );
        }
    }

    /// Forget completion, in memory and in storage.
    pub fn reset_completion(&mut self) {
        self.has_completed.set(false);
        if let Err(err) = self.storage.remove(&self.storage_key) {
            warn!(
                key = %self.storage_key,
                backend = self.storage.name(),
                error = %err,
                "failed to clear stored tour completion"
            );
        }
    }

    fn request_reveal(&mut self) {
        self.scheduler
            .cancel_where(|task| *task == TourTask::RevealStep);
        self.scheduler.request_frame(TourTask::RevealStep);
    }

    fn set_index(&mut self, index: Option<usize>) {
        let from = self.current_index.get();
        if from != index {
            debug!(?from, to = ?index, "tour step changed");
        }
        self.current_index.set(index);
    }

    // --- Keyboard ----------------------------------------------------------

    /// Handle a key press while the tour is active.
    ///
    /// `Escape` cancels. Arrow keys navigate unless the event came from a
    /// text input, button, or text area. Handled events have their default
    /// prevented; everything else passes through untouched.
    pub fn handle_keydown(&mut self, event: &mut KeyDown) {
        if !self.is_active() {
            return;
        }
        match event.code {
            KeyCode::Escape => {
                event.prevent_default();
                self.cancel();
            }
            KeyCode::Right if !event.from_interactive_control() => {
                event.prevent_default();
                self.next();
            }
            KeyCode::Left if !event.from_interactive_control() => {
                event.prevent_default();
                self.previous();
            }
            _ => {}
        }
    }

    // --- Page effects ------------------------------------------------------

    /// Mark, and scroll to, the current step's target.
    ///
    /// Returns `false` when nothing was highlighted: no current step, a
    /// target that resolves to nothing, or a step with highlighting off.
    pub fn highlight_target(&self) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };
        if !step.highlight {
            trace!(step = %step.id, "highlight disabled for step");
            return false;
        }
        let Some(el) = self.document.query_selector(&step.target) else {
            trace!(step = %step.id, selector = %step.target, "target not found");
            return false;
        };

        self.document.set_attribute(&el, ACTIVE_ATTR, "true");
        if self.document.computed_overflow(&el).clips_ring() {
            self.document.set_attribute(&el, OVERFLOW_ATTR, "true");
        }
        self.document
            .scroll_into_view(&el, ScrollIntoViewOptions::smooth_center());
        trace!(step = %step.id, "target highlighted");
        true
    }

    /// Remove highlight markers from every marked element on the page.
    pub fn clear_highlight(&self) {
        for el in self.document.query_selector_all(ACTIVE_SELECTOR) {
            self.document.remove_attribute(&el, ACTIVE_ATTR);
            self.document.remove_attribute(&el, OVERFLOW_ATTR);
        }
    }

    /// Announce the current step, if any.
    pub fn announce_step(&mut self) {
        let Some(step) = self.current_step() else {
            return;
        };
        let message = self.config.messages.step_message(self.progress(), step);
        self.announcer.announce(&message, Politeness::Polite);
    }

    /// Announce an arbitrary message through the tour's announcer.
    pub fn announce(&mut self, message: &str, politeness: Politeness) {
        self.announcer.announce(message, politeness);
    }

    fn restore_focus(&mut self) {
        if self.is_active() {
            // Restarted before the timer fired; keep the new capture.
            return;
        }
        let Some(el) = self.previously_focused.take() else {
            return;
        };
        if self.document.is_connected(&el) && self.document.is_focusable(&el) {
            self.document.focus(&el);
        } else {
            trace!("focus origin gone or unfocusable; not restoring");
        }
    }

    // --- Host integration --------------------------------------------------

    /// Arm development diagnostics. Call once the page has mounted.
    pub fn mount(&mut self) {
        if self.dev_mode {
            self.scheduler
                .set_timeout(VALIDATION_DELAY, TourTask::ValidateTargets);
        }
    }

    /// Steps whose targets do not resolve right now.
    #[must_use]
    pub fn missing_targets(&self) -> Vec<MissingTarget> {
        find_missing_targets(&self.document, &self.config.steps)
    }

    /// Whether the host's auto-start policy applies: enabled and not yet seen.
    #[must_use]
    pub fn should_auto_start(&self) -> bool {
        self.config.auto_start && !self.has_completed.get()
    }

    /// Start after the configured delay if [`should_auto_start`] holds.
    /// Returns whether a start was scheduled.
    ///
    /// [`should_auto_start`]: Self::should_auto_start
    pub fn schedule_auto_start(&mut self) -> bool {
        if !self.should_auto_start() {
            return false;
        }
        self.scheduler
            .cancel_where(|task| *task == TourTask::AutoStart);
        self.scheduler
            .set_timeout(self.config.auto_start_delay, TourTask::AutoStart);
        true
    }

    /// Run at the start of every host animation frame.
    pub fn on_animation_frame(&mut self) {
        self.announcer.on_frame();
        for task in self.scheduler.take_frame() {
            self.run_task(task);
        }
    }

    /// Advance the host clock by `dt`, running any timers now due.
    pub fn advance_time(&mut self, dt: Duration) {
        for task in self.scheduler.advance(dt) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: TourTask) {
        trace!(?task, "running deferred task");
        match task {
            TourTask::RevealStep => {
                self.highlight_target();
                self.announce_step();
            }
            TourTask::RestoreFocus => self.restore_focus(),
            TourTask::ValidateTargets => {
                if self.dev_mode {
                    warn_missing_targets(&self.document, &self.config.steps);
                }
            }
            TourTask::AutoStart => {
                if !self.has_completed.get() && !self.is_active() {
                    self.start();
                }
            }
        }
    }
}

fn read_completion(storage: &dyn KeyValueStore, key: &str) -> bool {
    match storage.get(key) {
        Ok(value) => value.as_deref() == Some(COMPLETED_VALUE),
        Err(err) => {
            warn!(
                key,
                backend = storage.name(),
                error = %err,
                "failed to read tour completion; treating as not completed"
            );
            false
        }
    }
}

impl<D: Document> fmt::Debug for TourController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourController")
            .field("storage_key", &self.storage_key)
            .field("steps", &self.config.steps.len())
            .field("current_index", &self.current_index.get())
            .field("has_completed", &self.has_completed.get())
            .field("dev_mode", &self.dev_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::announcer::announce_with;
    use crate::document::OverflowStyle;
    use crate::storage::UnavailableStorage;

    /// A page with nothing on it. Queries find nothing and focus goes nowhere.
    #[derive(Debug, Clone, Default)]
    struct BlankPage;

    impl Document for BlankPage {
        type Element = u32;

        fn query_selector(&self, _: &str) -> Option<u32> {
            None
        }
        fn query_selector_all(&self, _: &str) -> Vec<u32> {
            Vec::new()
        }
        fn get_element_by_id(&self, _: &str) -> Option<u32> {
            None
        }
        fn create_element(&self, _: &str) -> u32 {
            0
        }
        fn append_to_body(&self, _: &u32) {}
        fn is_connected(&self, _: &u32) -> bool {
            false
        }
        fn get_attribute(&self, _: &u32, _: &str) -> Option<String> {
            None
        }
        fn set_attribute(&self, _: &u32, _: &str, _: &str) {}
        fn remove_attribute(&self, _: &u32, _: &str) {}
        fn set_style(&self, _: &u32, _: &str, _: &str) {}
        fn set_text_content(&self, _: &u32, _: &str) {}
        fn computed_overflow(&self, _: &u32) -> OverflowStyle {
            OverflowStyle::default()
        }
        fn scroll_into_view(&self, _: &u32, _: ScrollIntoViewOptions) {}
        fn active_element(&self) -> Option<u32> {
            None
        }
        fn is_focusable(&self, _: &u32) -> bool {
            false
        }
        fn focus(&self, _: &u32) {}
    }

    fn steps(n: usize) -> Vec<TourStep> {
        (0..n)
            .map(|i| TourStep::data_tour(format!("s{i}"), format!("Step {i}"), "Body"))
            .collect()
    }

    fn controller(n: usize) -> (TourController<BlankPage>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let ctl = TourController::builder(TourConfig::new(steps(n)), BlankPage)
            .announcer(announce_with(move |msg: &str, _| {
                sink.borrow_mut().push(msg.to_string());
            }))
            .dev_mode(false)
            .build();
        (ctl, log)
    }

    #[test]
    fn starts_inactive() {
        let (ctl, _) = controller(3);
        assert_eq!(ctl.current_step_index(), None);
        assert!(!ctl.is_active());
        assert!(ctl.current_step().is_none());
        assert!(!ctl.has_completed_tour());
        assert_eq!(ctl.storage_key(), "guided-tour-v1");
    }

    #[test]
    fn walks_forward_and_completes() {
        let (mut ctl, log) = controller(2);
        ctl.start();
        assert_eq!(ctl.current_step_index(), Some(0));
        ctl.next();
        assert_eq!(ctl.current_step_index(), Some(1));
        ctl.next();
        assert_eq!(ctl.current_step_index(), None);
        assert!(ctl.has_completed_tour());
        assert_eq!(log.borrow().last().map(String::as_str), Some("Tour complete!"));
    }

    #[test]
    fn previous_stops_at_first_step() {
        let (mut ctl, _) = controller(3);
        ctl.previous();
        assert_eq!(ctl.current_step_index(), None);
        ctl.start();
        ctl.previous();
        assert_eq!(ctl.current_step_index(), Some(0));
        ctl.go_to_step(2);
        ctl.previous();
        assert_eq!(ctl.current_step_index(), Some(1));
    }

    #[test]
    fn go_to_step_ignores_out_of_range() {
        let (mut ctl, _) = controller(3);
        ctl.start();
        ctl.go_to_step(3);
        assert_eq!(ctl.current_step_index(), Some(0));
        ctl.go_to_step(2);
        assert_eq!(ctl.current_step_index(), Some(2));
    }

    #[test]
    fn empty_tour_never_starts() {
        let (mut ctl, _) = controller(0);
        ctl.start();
        assert!(!ctl.is_active());
        assert!(!ctl.has_pending_effects());
    }

    #[test]
    fn next_from_inactive_enters_first_step() {
        let (mut ctl, _) = controller(2);
        ctl.next();
        assert_eq!(ctl.current_step_index(), Some(0));
    }

    #[test]
    fn step_announced_on_frame() {
        let (mut ctl, log) = controller(3);
        ctl.start();
        assert!(log.borrow().is_empty());
        ctl.on_animation_frame();
        assert_eq!(
            log.borrow().as_slice(),
            ["Tour step 1 of 3: Step 0. Body".to_string()]
        );
    }

    #[test]
    fn escape_cancels_only_while_active() {
        let (mut ctl, log) = controller(2);
        let mut idle = KeyDown::new(KeyCode::Escape);
        ctl.handle_keydown(&mut idle);
        assert!(!idle.is_default_prevented());
        assert!(!ctl.has_completed_tour());

        ctl.start();
        let mut esc = KeyDown::new(KeyCode::Escape);
        ctl.handle_keydown(&mut esc);
        assert!(esc.is_default_prevented());
        assert!(!ctl.is_active());
        assert!(ctl.has_completed_tour());
        assert_eq!(
            log.borrow().last().map(String::as_str),
            Some("Tour cancelled. You can restart it anytime from the Tour button.")
        );
    }

    #[test]
    fn arrows_ignored_inside_text_fields() {
        let (mut ctl, _) = controller(3);
        ctl.start();
        let mut typing = KeyDown::new(KeyCode::Right).with_target("input");
        ctl.handle_keydown(&mut typing);
        assert!(!typing.is_default_prevented());
        assert_eq!(ctl.current_step_index(), Some(0));

        let mut arrow = KeyDown::new(KeyCode::Right).with_target("div");
        ctl.handle_keydown(&mut arrow);
        assert!(arrow.is_default_prevented());
        assert_eq!(ctl.current_step_index(), Some(1));
    }

    #[test]
    fn unavailable_storage_keeps_session_state() {
        let mut ctl = TourController::builder(TourConfig::new(steps(1)), BlankPage)
            .storage(UnavailableStorage)
            .announcer(announce_with(|_: &str, _| {}))
            .build();
        assert!(!ctl.has_completed_tour());
        ctl.mark_as_seen();
        assert!(ctl.has_completed_tour());
        ctl.reset_completion();
        assert!(!ctl.has_completed_tour());
    }

    #[test]
    fn auto_start_waits_for_delay() {
        let (mut ctl, _) = controller(2);
        assert!(ctl.should_auto_start());
        assert!(ctl.schedule_auto_start());
        ctl.advance_time(Duration::from_millis(799));
        assert!(!ctl.is_active());
        ctl.advance_time(Duration::from_millis(1));
        assert_eq!(ctl.current_step_index(), Some(0));
    }

    #[test]
    fn auto_start_skipped_once_seen() {
        let (mut ctl, _) = controller(2);
        ctl.mark_as_seen();
        assert!(!ctl.should_auto_start());
        assert!(!ctl.schedule_auto_start());
        assert!(!ctl.has_pending_effects());
    }

    #[test]
    fn subscribers_see_index_changes() {
        let (mut ctl, _) = controller(2);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = ctl.subscribe_step_index(move |idx| sink.borrow_mut().push(*idx));
        ctl.start();
        ctl.next();
        ctl.cancel();
        assert_eq!(*seen.borrow(), vec![Some(0), Some(1), None]);
    }

    #[test]
    fn step_lookup_by_id() {
        let (ctl, _) = controller(3);
        assert_eq!(ctl.get_step_index("s2"), Some(2));
        assert_eq!(ctl.get_step_by_id("s1").map(|s| s.title.as_str()), Some("Step 1"));
        assert!(ctl.get_step_by_id("nope").is_none());
    }
}
