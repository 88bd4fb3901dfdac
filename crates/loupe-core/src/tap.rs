//! Double-tap detection.

use crate::clock::Timestamp;
use crate::constants::DOUBLE_TAP_DELAY;

/// Classifies each press as the second half of a double tap or a fresh tap.
///
/// Only a fresh tap moves the stored timestamp. The second tap of a pair
/// leaves it in place, so a rapid third tap is measured against the first
/// tap too and also classifies as a double tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapTimer {
    last: Timestamp,
}

impl TapTimer {
    pub fn new(now: Timestamp) -> Self {
        Self { last: now }
    }

    /// Record a press at `event_time`. Returns `true` for a double tap.
    pub fn record_and_classify(&mut self, event_time: Timestamp) -> bool {
        if event_time.saturating_since(self.last) < DOUBLE_TAP_DELAY {
            tracing::debug!(
                last = self.last.as_millis(),
                now = event_time.as_millis(),
                "double tap"
            );
            true
        } else {
            self.last = event_time;
            false
        }
    }

    pub fn last(&self) -> Timestamp {
        self.last
    }
}
