#![forbid(unsafe_code)]

//! Tour progress, derived from the current step index.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Progress through the tour, 1-indexed for display.
///
/// Never stored: always computed from the session index and step count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct TourProgress {
    /// Current step number (`index + 1`), `0` while inactive.
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
    /// Completion percentage, rounded half away from zero (0-100).
    pub percentage: u8,
}

impl TourProgress {
    /// Compute progress for `index` (`None` when inactive) out of `total` steps.
    #[must_use]
    pub fn compute(index: Option<usize>, total: usize) -> Self {
        let current = index.map_or(0, |i| i + 1);
        let percentage = if total == 0 {
            0
        } else {
            // Integer form of round(100 * current / total).
            let scaled = (current.min(total) as u64 * 200 + total as u64) / (2 * total as u64);
            scaled.min(100) as u8
        };
        Self {
            current,
            total,
            percentage,
        }
    }

    /// Whether the last step is current.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.total > 0 && self.current == self.total
    }
}
