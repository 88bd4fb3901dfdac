//! Swipe-to-navigate decisions.
//!
//! Two policies exist and a carousel picks one at construction:
//!
//! - [`SwipeMode::Continuous`]: every unzoomed one-finger move frame with a
//!   nonzero horizontal drag requests the neighbouring item. Repeated
//!   requests for the same neighbour are idempotent for the host.
//! - [`SwipeMode::ReleaseThreshold`]: nothing happens while moving; at
//!   release, a drag longer than a third of the viewport width pages once.
//!
//! Drag right (`dx > 0`) goes to the previous item, drag left to the next.
//! Requested indices are clamped, and a clamped request that equals the
//! current index is still issued.

use serde::{Deserialize, Serialize};

use crate::constants::PAGING_THRESHOLD_FRACTION;
use crate::effects::NavigationRequest;
use crate::events::TouchPoint;
use crate::geometry::clamp_index;
use crate::zoom::ZoomStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwipeMode {
    #[default]
    Continuous,
    ReleaseThreshold,
}

/// Where a one-finger drag started. Lives for one gesture at most.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSession {
    pub start: TouchPoint,
}

#[derive(Debug, Clone, Copy)]
pub struct SwipeNavigator {
    mode: SwipeMode,
    item_count: usize,
    viewport_width: f32,
}

impl SwipeNavigator {
    pub fn new(mode: SwipeMode, item_count: usize, viewport_width: f32) -> Self {
        Self {
            mode,
            item_count,
            viewport_width,
        }
    }

    pub fn mode(&self) -> SwipeMode {
        self.mode
    }

    /// Continuous policy: decide on a single move frame.
    ///
    /// `cooldown_elapsed` is false while a pinch ended too recently for a
    /// lone finger to be read as a swipe.
    pub fn on_single_finger_move(
        &self,
        dx: f32,
        status: ZoomStatus,
        current_index: usize,
        cooldown_elapsed: bool,
    ) -> Option<NavigationRequest> {
        if self.mode != SwipeMode::Continuous || status != ZoomStatus::Normal || !cooldown_elapsed
        {
            return None;
        }
        self.step(dx, current_index)
    }

    /// Release-threshold policy: decide once, when the finger lifts.
    pub fn on_release(
        &self,
        session: Option<SwipeSession>,
        release_at: TouchPoint,
        status: ZoomStatus,
        current_index: usize,
    ) -> Option<NavigationRequest> {
        if self.mode != SwipeMode::ReleaseThreshold || status != ZoomStatus::Normal {
            return None;
        }
        let start = session?.start;
        let dx = release_at.x - start.x;
        let threshold = self.viewport_width * PAGING_THRESHOLD_FRACTION;
        if dx.abs() > threshold {
            self.step(dx, current_index)
        } else {
            tracing::trace!(dx, threshold, "drag below paging threshold");
            None
        }
    }

    fn step(&self, dx: f32, current_index: usize) -> Option<NavigationRequest> {
        let current = current_index as isize;
        let requested = if dx > 0.0 {
            current - 1
        } else if dx < 0.0 {
            current + 1
        } else {
            return None;
        };
        let target_index = clamp_index(requested, self.item_count);
        tracing::debug!(current_index, requested, target_index, "swipe navigation");
        Some(NavigationRequest { target_index })
    }
}
