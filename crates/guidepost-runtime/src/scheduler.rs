#![forbid(unsafe_code)]

//! Host-driven deferral of tour side effects.
//!
//! Highlighting a target has to wait until the host has rendered the state
//! change that selected it, and focus restoration waits a short fixed delay
//! for the popover to close. Both are modelled as queued tasks:
//!
//! - **Frame tasks** run on the host's next animation frame, FIFO.
//! - **Timers** run once the host clock has advanced past their due time,
//!   ordered by due time, then by scheduling order.
//!
//! Nothing here reads the wall clock. The host advances a
//! [`DeterministicClock`] explicitly, which keeps runs reproducible.

use std::collections::VecDeque;
use std::time::Duration;

/// Monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

#[derive(Debug)]
struct Timer<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Frame queue plus timer list.
#[derive(Debug)]
pub struct Scheduler<T> {
    clock: DeterministicClock,
    frame: VecDeque<T>,
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            frame: VecDeque::new(),
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `task` for the next animation frame.
    pub fn request_frame(&mut self, task: T) {
        self.frame.push_back(task);
    }

    /// Run `task` once `delay` has elapsed on the host clock.
    pub fn set_timeout(&mut self, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due: self.clock.now().saturating_add(delay),
            seq,
            task,
        });
    }

    /// Take every task queued for this frame.
    ///
    /// Tasks requested while the returned batch runs land in the following
    /// frame.
    pub fn take_frame(&mut self) -> Vec<T> {
        self.frame.drain(..).collect()
    }

    /// Advance the clock by `dt` and take every timer now due.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.clock.advance(dt);
        let now = self.clock.now();

        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.timers.len());
        for timer in self.timers.drain(..) {
            if timer.due <= now {
                due.push(timer);
            } else {
                pending.push(timer);
            }
        }
        self.timers = pending;

        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Drop every queued task matching `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.frame.retain(|task| !predicate(task));
        self.timers.retain(|timer| !predicate(&timer.task));
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub fn pending_frame_tasks(&self) -> usize {
        self.frame.len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.frame.is_empty() && self.timers.is_empty()
    }
}
