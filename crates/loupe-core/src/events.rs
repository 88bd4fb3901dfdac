//! Touch input contracts.
//!
//! Hosts translate their platform touch events into these types. Contacts
//! are not tracked by id: the order the host reports them in is treated as
//! first/second contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// A contact point in page coordinates (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One touch callback from the host: when it happened and where the
/// contacts are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub timestamp: Timestamp,
    /// Contacts in host order. Only the first two are ever read.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(timestamp: Timestamp, touches: Vec<TouchPoint>) -> Self {
        Self { timestamp, touches }
    }

    pub fn single(timestamp: Timestamp, x: f32, y: f32) -> Self {
        Self::new(timestamp, vec![TouchPoint::new(x, y)])
    }

    pub fn pair(timestamp: Timestamp, a: TouchPoint, b: TouchPoint) -> Self {
        Self::new(timestamp, vec![a, b])
    }

    /// Primary contact, if any.
    pub fn first(&self) -> Option<TouchPoint> {
        self.touches.first().copied()
    }

    /// First two contacts; surplus contacts are ignored.
    pub fn first_pair(&self) -> Option<[TouchPoint; 2]> {
        match self.touches.as_slice() {
            [a, b, ..] => Some([*a, *b]),
            _ => None,
        }
    }
}

/// Displacement accumulated since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureDelta {
    pub dx: f32,
    pub dy: f32,
    pub active_touches: usize,
}

impl GestureDelta {
    pub const fn new(dx: f32, dy: f32, active_touches: usize) -> Self {
        Self {
            dx,
            dy,
            active_touches,
        }
    }

    pub fn is_pinch(&self) -> bool {
        self.active_touches == 2
    }
}
