//! Pinch baseline tracking.
//!
//! Zoom is computed relative to a baseline: the finger positions, zoom level
//! and view center captured when the pinch (re)started. A two-finger frame
//! that arrives more than [`PINCH_DELAY`] after the previous one only
//! captures a new baseline and changes nothing else (a dead frame); frames
//! inside the window produce a distance ratio against that baseline.
//!
//! # Algorithm
//! ```text
//! rebaseline:  rc' = rc − 1/(2·zl) + mid / (viewport·zl)      per axis
//! ratio:       (|t₀t₁|·zl + ZOOM_SENSITIVITY) / (|b₀b₁|·zl + ZOOM_SENSITIVITY)
//! ```

use crate::clock::Timestamp;
use crate::constants::{PINCH_DELAY, ZOOM_SENSITIVITY};
use crate::events::TouchPoint;
use crate::geometry::{NormalizedCenter, ViewportSize, touch_distance, touch_midpoint};

/// Snapshot the pinch ratio is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    pub zoom_level: f32,
    /// Zoom anchor. Follows the committed view center between pinches.
    pub center: NormalizedCenter,
    pub timestamp: Timestamp,
    /// Contacts at the last re-baseline; `None` until the first one.
    pub touches: Option<[TouchPoint; 2]>,
}

/// Outcome of feeding one two-finger frame to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchUpdate {
    /// A new baseline was captured. The caller must not zoom this frame.
    Rebaselined,
    /// Relative zoom factor against the baseline.
    Ratio(f32),
}

#[derive(Debug, Clone)]
pub struct PinchTracker {
    viewport: ViewportSize,
    baseline: PinchBaseline,
}

impl PinchTracker {
    pub fn new(viewport: ViewportSize, now: Timestamp) -> Self {
        Self {
            viewport,
            baseline: PinchBaseline {
                zoom_level: 1.0,
                center: NormalizedCenter::MIDDLE,
                timestamp: now,
                touches: None,
            },
        }
    }

    pub fn baseline(&self) -> &PinchBaseline {
        &self.baseline
    }

    /// Center a pinch frame should commit.
    pub fn anchor(&self) -> NormalizedCenter {
        self.baseline.center
    }

    /// Keep the anchor in step with a freshly committed view center.
    pub fn sync_center(&mut self, center: NormalizedCenter) {
        self.baseline.center = center;
    }

    /// Whether the last pinch frame is old enough for a one-finger drag to
    /// count as a swipe.
    pub fn cooldown_elapsed(&self, now: Timestamp) -> bool {
        now.saturating_since(self.baseline.timestamp) > PINCH_DELAY
    }

    /// A second finger just landed. Forget the old contacts so the next
    /// frame captures a fresh baseline instead of zooming.
    pub fn restart(&mut self) {
        self.baseline.touches = None;
    }

    /// End of a two-finger gesture: the next pinch always starts with a
    /// fresh baseline.
    pub fn release(&mut self) {
        self.baseline.timestamp = Timestamp::ZERO;
    }

    pub fn update(
        &mut self,
        touches: [TouchPoint; 2],
        now: Timestamp,
        zoom_level: f32,
    ) -> PinchUpdate {
        let stale = now.saturating_since(self.baseline.timestamp) > PINCH_DELAY;
        let base_touches = match self.baseline.touches {
            Some(base) if !stale => base,
            _ => {
                self.rebaseline(touches, now, zoom_level);
                return PinchUpdate::Rebaselined;
            }
        };

        let distance = touch_distance(touches[0], touches[1]) * zoom_level;
        let base_distance = touch_distance(base_touches[0], base_touches[1]) * zoom_level;
        let ratio = (distance + ZOOM_SENSITIVITY) / (base_distance + ZOOM_SENSITIVITY);
        self.baseline.timestamp = now;

        tracing::trace!(distance, base_distance, ratio, "pinch frame");
        PinchUpdate::Ratio(ratio)
    }

    fn rebaseline(&mut self, touches: [TouchPoint; 2], now: Timestamp, zoom_level: f32) {
        let mid = touch_midpoint(touches[0], touches[1]);
        let half_window = 1.0 / (2.0 * zoom_level);
        let prev = self.baseline.center;
        let center = NormalizedCenter::new(
            prev.rcx - half_window + mid.x / (self.viewport.width * zoom_level),
            prev.rcy - half_window + mid.y / (self.viewport.height * zoom_level),
        );

        tracing::debug!(
            prev_rcx = prev.rcx,
            prev_rcy = prev.rcy,
            rcx = center.rcx,
            rcy = center.rcy,
            "pinch baseline captured"
        );

        self.baseline = PinchBaseline {
            zoom_level,
            center,
            timestamp: now,
            touches: Some(touches),
        };
    }
}
