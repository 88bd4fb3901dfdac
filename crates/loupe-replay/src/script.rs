//! Recorded touch scripts.
//!
//! A script is a JSON document with an optional `header` (a [`ConfigLayer`])
//! and a list of events, each tagged with `kind`:
//!
//! ```json
//! {
//!   "header": { "item_count": 6, "mode": "continuous" },
//!   "events": [
//!     { "kind": "start",   "t": 1000, "touches": [{ "x": 100, "y": 200 }] },
//!     { "kind": "move",    "t": 1016, "touches": [{ "x": 60, "y": 200 }], "dx": -40, "dy": 0 },
//!     { "kind": "release", "t": 1032, "touches": [{ "x": 60, "y": 200 }], "dx": -40, "dy": 0 }
//!   ]
//! }
//! ```
//!
//! `t` is in milliseconds. `dx`/`dy` are cumulative since the press.
//! `active_touches` defaults to the number of listed touches.

use std::path::Path;

use loupe_core::{GestureDelta, Timestamp, TouchEvent, TouchPoint};
use serde::Deserialize;

use crate::config::ConfigLayer;
use crate::error::ReplayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub header: ConfigLayer,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Start {
        t: u64,
        touches: Vec<TouchPoint>,
    },
    Move {
        t: u64,
        touches: Vec<TouchPoint>,
        dx: f32,
        dy: f32,
        #[serde(default)]
        active_touches: Option<usize>,
    },
    Release {
        t: u64,
        #[serde(default)]
        touches: Vec<TouchPoint>,
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
        #[serde(default)]
        active_touches: Option<usize>,
    },
}

impl ScriptEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Move { .. } => "move",
            Self::Release { .. } => "release",
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Start { t, .. } | Self::Move { t, .. } | Self::Release { t, .. } => {
                Timestamp::from_millis(*t)
            }
        }
    }

    fn touches(&self) -> &[TouchPoint] {
        match self {
            Self::Start { touches, .. }
            | Self::Move { touches, .. }
            | Self::Release { touches, .. } => touches,
        }
    }

    pub fn touch_event(&self) -> TouchEvent {
        TouchEvent::new(self.timestamp(), self.touches().to_vec())
    }

    /// Cumulative displacement carried by the event. A press has none.
    pub fn delta(&self) -> GestureDelta {
        match self {
            Self::Start { touches, .. } => GestureDelta::new(0.0, 0.0, touches.len()),
            Self::Move {
                touches,
                dx,
                dy,
                active_touches,
                ..
            }
            | Self::Release {
                touches,
                dx,
                dy,
                active_touches,
                ..
            } => GestureDelta::new(*dx, *dy, active_touches.unwrap_or(touches.len())),
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), events = script.events.len(), "script loaded");
        Ok(script)
    }

    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Timestamps must not go backwards, presses and moves need a contact,
    /// and every coordinate must be finite.
    fn validate(&self) -> Result<(), ReplayError> {
        let mut previous = Timestamp::ZERO;
        for (index, event) in self.events.iter().enumerate() {
            let invalid = |reason: String| ReplayError::InvalidEvent { index, reason };

            let t = event.timestamp();
            if t < previous {
                return Err(invalid(format!(
                    "timestamp {}ms is earlier than {}ms",
                    t.as_millis(),
                    previous.as_millis()
                )));
            }
            previous = t;

            if !matches!(event, ScriptEvent::Release { .. }) && event.touches().is_empty() {
                return Err(invalid(format!("{} has no touches", event.kind())));
            }
            if event
                .touches()
                .iter()
                .any(|p| !(p.x.is_finite() && p.y.is_finite()))
            {
                return Err(invalid("touch coordinate is not finite".to_string()));
            }
            let delta = event.delta();
            if !(delta.dx.is_finite() && delta.dy.is_finite()) {
                return Err(invalid("displacement is not finite".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_script() {
        let script = Script::parse(
            r#"{
                "events": [
                    { "kind": "start", "t": 1000, "touches": [{ "x": 10, "y": 20 }] },
                    { "kind": "move", "t": 1016, "touches": [{ "x": 0, "y": 20 }],
                      "dx": -10, "dy": 0 },
                    { "kind": "release", "t": 1032 }
                ]
            }"#,
        )
        .expect("script should parse");

        assert_eq!(script.header, ConfigLayer::default());
        assert_eq!(script.events.len(), 3);
        assert_eq!(script.events[1].kind(), "move");
        assert_eq!(script.events[1].delta(), GestureDelta::new(-10.0, 0.0, 1));
        assert_eq!(script.events[2].delta(), GestureDelta::new(0.0, 0.0, 0));
        assert!(script.events[2].touch_event().first().is_none());
    }

    #[test]
    fn test_header_is_a_config_layer() {
        let script = Script::parse(
            r#"{
                "header": { "item_count": 3, "mode": "release-threshold",
                            "viewport": { "width": 400, "height": 800 } },
                "events": []
            }"#,
        )
        .expect("script should parse");
        assert_eq!(script.header.item_count, Some(3));
        assert_eq!(
            script.header.mode,
            Some(loupe_core::SwipeMode::ReleaseThreshold)
        );
    }

    #[test]
    fn test_explicit_active_touches_wins() {
        let script = Script::parse(
            r#"{ "events": [
                { "kind": "start", "t": 0, "touches": [{ "x": 1, "y": 1 }] },
                { "kind": "release", "t": 5, "touches": [{ "x": 1, "y": 1 }], "active_touches": 2 }
            ] }"#,
        )
        .expect("script should parse");
        assert!(script.events[1].delta().is_pinch());
    }

    #[test]
    fn test_rejects_time_going_backwards() {
        let err = Script::parse(
            r#"{ "events": [
                { "kind": "start", "t": 100, "touches": [{ "x": 1, "y": 1 }] },
                { "kind": "release", "t": 50 }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::InvalidEvent { index: 1, .. }));
    }

    #[test]
    fn test_rejects_press_without_touches() {
        let err = Script::parse(r#"{ "events": [ { "kind": "start", "t": 0, "touches": [] } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ReplayError::InvalidEvent { index: 0, .. }));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = Script::parse(r#"{ "events": [ { "kind": "fling", "t": 0 } ] }"#).unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
    }
}
