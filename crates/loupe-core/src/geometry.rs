//! Viewport geometry and clamping helpers.
//!
//! The view center is kept in normalized coordinates: `(0, 0)` is the
//! top-left of the item's content, `(1, 1)` the bottom-right. At zoom level
//! `zl` the visible window spans `1/zl` of the content on each axis, so the
//! center may only move within `[1/(2·zl), 1 − 1/(2·zl)]` before the window
//! would leave the content.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::events::TouchPoint;

/// Pixel dimensions of the surface one item is displayed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    /// Both sides must be positive. Every normalization divides by them.
    pub const fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must have a positive size");
        Self { width, height }
    }

    /// Map a page position into normalized content coordinates at zoom 1.
    pub fn normalize(self, point: TouchPoint) -> NormalizedCenter {
        NormalizedCenter::new(point.x / self.width, point.y / self.height)
    }
}

/// Fraction of the content's width/height currently centered in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCenter {
    pub rcx: f32,
    pub rcy: f32,
}

impl NormalizedCenter {
    pub const MIDDLE: Self = Self { rcx: 0.5, rcy: 0.5 };

    pub const fn new(rcx: f32, rcy: f32) -> Self {
        Self { rcx, rcy }
    }

    /// Border-clamp both axes for zoom level `zoom_level`.
    pub fn clamped(self, zoom_level: f32) -> Self {
        Self {
            rcx: adjust_border(self.rcx, zoom_level),
            rcy: adjust_border(self.rcy, zoom_level),
        }
    }
}

impl Default for NormalizedCenter {
    fn default() -> Self {
        Self::MIDDLE
    }
}

/// Constrain a normalized center coordinate so the zoomed window stays
/// inside the content.
///
/// ```text
/// lo = 1 / (2·zl)
/// hi = 1 − lo
/// rc < lo → lo,  rc > hi → hi
/// ```
///
/// At `zl = 1` both bounds are `0.5`, so the unzoomed view is always centered.
pub fn adjust_border(rc: f32, zoom_level: f32) -> f32 {
    let lo = 1.0 / (2.0 * zoom_level);
    let hi = 1.0 - lo;
    if rc < lo {
        lo
    } else if rc > hi {
        hi
    } else {
        rc
    }
}

/// Saturate a requested item index into `[0, item_count − 1]`.
///
/// An empty list clamps everything to `0`.
pub fn clamp_index(requested: isize, item_count: usize) -> usize {
    let last = item_count.saturating_sub(1);
    if requested <= 0 {
        0
    } else {
        (requested as usize).min(last)
    }
}

/// Straight-line distance between the first two contacts.
pub fn touch_distance(a: TouchPoint, b: TouchPoint) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

pub fn touch_midpoint(a: TouchPoint, b: TouchPoint) -> Vec2 {
    (a.as_vec2() + b.as_vec2()) * 0.5
}
