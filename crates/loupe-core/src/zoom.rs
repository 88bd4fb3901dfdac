//! Per-item zoom/pan state and its transitions.
//!
//! [`ZoomPanState`] is a plain value. The `apply_*` reducers are pure: they
//! take a state and return a [`Transition`] holding the next state and the
//! scale animation the commit schedules. [`ZoomPanController`] owns the
//! authoritative state for the active item and commits transitions.
//!
//! Every commit border-clamps the center for the resulting zoom level, so
//! the visible window never leaves the content.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, MOVEMENT_SENSITIVITY, TAP_ZOOM_LEVEL, ZOOM_ANIMATION_DURATION,
};
use crate::effects::ScaleTarget;
use crate::events::TouchPoint;
use crate::geometry::{NormalizedCenter, ViewportSize};

// ── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomStatus {
    /// Unzoomed. One-finger drags navigate between items.
    Normal,
    /// Zoomed in. One-finger drags pan within the item.
    Zoom,
}

impl ZoomStatus {
    /// Status implied by a zoom level.
    pub fn for_level(zoom_level: f32) -> Self {
        if zoom_level > MIN_ZOOM_LEVEL {
            Self::Zoom
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPanState {
    pub zoom_level: f32,
    pub center: NormalizedCenter,
    pub status: ZoomStatus,
}

impl Default for ZoomPanState {
    fn default() -> Self {
        Self {
            zoom_level: MIN_ZOOM_LEVEL,
            center: NormalizedCenter::MIDDLE,
            status: ZoomStatus::Normal,
        }
    }
}

impl ZoomPanState {
    /// Build a committed state: zoom saturated into range, center clamped,
    /// status derived from the zoom level.
    pub fn committed(center: NormalizedCenter, zoom_level: f32) -> Self {
        let zoom_level = zoom_level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        Self {
            zoom_level,
            center: center.clamped(zoom_level),
            status: ZoomStatus::for_level(zoom_level),
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.status == ZoomStatus::Zoom
    }

    /// Render transform for this state on `viewport`.
    pub fn transform(&self, viewport: ViewportSize) -> Transform {
        Transform {
            scale: self.zoom_level,
            translate_x: (0.5 - self.center.rcx) * viewport.width,
            translate_y: (0.5 - self.center.rcy) * viewport.height,
        }
    }
}

/// Scale and translation the rendering collaborator applies to the item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

// ── Reducers ────────────────────────────────────────────────────────────────

/// Result of a reducer: the next state plus the animation it schedules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: ZoomPanState,
    pub animation: ScaleTarget,
}

impl Transition {
    fn commit(center: NormalizedCenter, zoom_level: f32) -> Self {
        let state = ZoomPanState::committed(center, zoom_level);
        Self {
            state,
            animation: ScaleTarget {
                scale: state.zoom_level,
                duration: ZOOM_ANIMATION_DURATION,
            },
        }
    }
}

/// Toggle between unzoomed and tap-zoomed.
///
/// From `Normal`, zoom to [`TAP_ZOOM_LEVEL`] centered on the tap location.
/// From `Zoom`, reset to the unzoomed, centered view.
pub fn apply_double_tap(
    state: &ZoomPanState,
    location: TouchPoint,
    viewport: ViewportSize,
) -> Transition {
    match state.status {
        ZoomStatus::Normal => Transition::commit(viewport.normalize(location), TAP_ZOOM_LEVEL),
        ZoomStatus::Zoom => Transition::commit(NormalizedCenter::MIDDLE, MIN_ZOOM_LEVEL),
    }
}

/// Move the view center against the drag direction.
///
/// ```text
/// rcx' = rcx − dx·MOVEMENT_SENSITIVITY / (width·zl)
/// rcy' = rcy − dy·MOVEMENT_SENSITIVITY / (height·zl)
/// ```
pub fn apply_pan(state: &ZoomPanState, dx: f32, dy: f32, viewport: ViewportSize) -> Transition {
    let zl = state.zoom_level;
    let center = NormalizedCenter::new(
        state.center.rcx - dx * MOVEMENT_SENSITIVITY / (viewport.width * zl),
        state.center.rcy - dy * MOVEMENT_SENSITIVITY / (viewport.height * zl),
    );
    Transition::commit(center, zl)
}

/// Scale the zoom level by a pinch distance ratio, saturating into
/// `[MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL]`. The committed center is `anchor`,
/// clamped for the new level.
pub fn apply_pinch(state: &ZoomPanState, ratio: f32, anchor: NormalizedCenter) -> Transition {
    Transition::commit(anchor, ratio * state.zoom_level)
}

// ── Controller ──────────────────────────────────────────────────────────────

/// Owns the committed zoom/pan state of the active item.
#[derive(Debug, Clone)]
pub struct ZoomPanController {
    viewport: ViewportSize,
    state: ZoomPanState,
}

impl ZoomPanController {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            state: ZoomPanState::default(),
        }
    }

    pub fn state(&self) -> &ZoomPanState {
        &self.state
    }

    pub fn transform(&self) -> Transform {
        self.state.transform(self.viewport)
    }

    pub fn double_tap(&mut self, location: TouchPoint) -> ScaleTarget {
        let transition = apply_double_tap(&self.state, location, self.viewport);
        self.commit(transition, "double tap")
    }

    /// Pan while zoomed. Returns `None` and leaves the state alone when the
    /// item is not zoomed.
    pub fn pan_move(&mut self, dx: f32, dy: f32) -> Option<ScaleTarget> {
        if !self.state.is_zoomed() {
            tracing::trace!(dx, dy, "pan ignored while unzoomed");
            return None;
        }
        let transition = apply_pan(&self.state, dx, dy, self.viewport);
        Some(self.commit(transition, "pan"))
    }

    /// Apply a pinch ratio without moving the center.
    pub fn pinch_update(&mut self, ratio: f32) -> ScaleTarget {
        let anchor = self.state.center;
        self.pinch_update_at(ratio, anchor)
    }

    /// Apply a pinch ratio, committing `anchor` as the new center.
    pub fn pinch_update_at(&mut self, ratio: f32, anchor: NormalizedCenter) -> ScaleTarget {
        let transition = apply_pinch(&self.state, ratio, anchor);
        self.commit(transition, "pinch")
    }

    fn commit(&mut self, transition: Transition, cause: &'static str) -> ScaleTarget {
        let next = transition.state;
        tracing::debug!(
            cause,
            zoom = next.zoom_level,
            rcx = next.center.rcx,
            rcy = next.center.rcy,
            status = ?next.status,
            "zoom state committed"
        );
        self.state = next;
        transition.animation
    }
}
