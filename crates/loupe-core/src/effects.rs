//! Effects returned by the gesture state machine.
//!
//! Reducers never call collaborators directly. They hand back what should
//! happen and the host applies it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retarget the rendered scale. A newer target replaces any in-flight one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTarget {
    pub scale: f32,
    pub duration: Duration,
}

/// Ask the list collaborator to bring `target_index` into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub target_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Effect {
    AnimateScale(ScaleTarget),
    Navigate(NavigationRequest),
}

impl From<ScaleTarget> for Effect {
    fn from(target: ScaleTarget) -> Self {
        Self::AnimateScale(target)
    }
}

impl From<NavigationRequest> for Effect {
    fn from(request: NavigationRequest) -> Self {
        Self::Navigate(request)
    }
}
