//! Retargetable scale interpolation.
//!
//! A minimal stand-in for the host's animated transform: linear
//! interpolation from the currently displayed value to the latest target.
//! Retargeting mid-flight starts the new segment from wherever the old one
//! had got to; the last target written wins.

use std::time::Duration;

use crate::clock::Timestamp;
use crate::effects::ScaleTarget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAnimation {
    from: f32,
    to: f32,
    started_at: Timestamp,
    duration: Duration,
}

impl ScaleAnimation {
    pub fn new(initial: f32) -> Self {
        Self {
            from: initial,
            to: initial,
            started_at: Timestamp::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Start a new segment toward `target` at `now`.
    pub fn retarget(&mut self, target: ScaleTarget, now: Timestamp) {
        self.from = self.value_at(now);
        self.to = target.scale;
        self.started_at = now;
        self.duration = target.duration;
    }

    /// Displayed scale at `now`.
    pub fn value_at(&self, now: Timestamp) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_since(self.started_at).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Timestamp) -> bool {
        now.saturating_since(self.started_at) >= self.duration
    }
}
