//! Gesture tuning constants.
//!
//! Fixed at build time. Distances are in logical pixels, delays in
//! milliseconds of the clock that stamps the events.

use std::time::Duration;

/// Idle gap after which the next two-finger frame re-baselines the pinch
/// instead of zooming. Also the cooldown between a pinch frame and a
/// single-finger swipe.
pub const PINCH_DELAY: Duration = Duration::from_millis(300);

/// Maximum gap between two presses to count as a double tap (exclusive).
pub const DOUBLE_TAP_DELAY: Duration = Duration::from_millis(300);

/// Per-axis drag distance a one-finger move must exceed before the viewer
/// claims it from the surrounding scroll container.
pub const MOVEMENT_THRESHOLD: f32 = 5.0;

/// Additive damping applied to both pinch distances before taking their
/// ratio. Keeps short finger spreads from producing large zoom jumps.
pub const ZOOM_SENSITIVITY: f32 = 150.0;

pub const MIN_ZOOM_LEVEL: f32 = 1.0;
pub const MAX_ZOOM_LEVEL: f32 = 3.0;

/// Zoom level a double tap jumps to from the unzoomed state.
pub const TAP_ZOOM_LEVEL: f32 = 1.3;

/// Scales drag distance into normalized pan distance while zoomed.
pub const MOVEMENT_SENSITIVITY: f32 = 0.3;

/// Duration of the scale interpolation scheduled on every state commit.
pub const ZOOM_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Fraction of the viewport width a drag must exceed to page in
/// release-threshold swipe mode.
pub const PAGING_THRESHOLD_FRACTION: f32 = 1.0 / 3.0;
