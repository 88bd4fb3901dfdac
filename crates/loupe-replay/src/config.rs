//! Runtime configuration for the replay host.
//!
//! Settings are layered: built-in defaults (which honour the `LOUPE_*`
//! environment variables), then the script header, then command-line flags.

use loupe_core::{SwipeMode, ViewportSize};
use serde::Deserialize;

use crate::error::ReplayError;

/// Default viewport width in logical pixels.
const DEFAULT_WIDTH: f32 = 375.0;
/// Default viewport height in logical pixels.
const DEFAULT_HEIGHT: f32 = 667.0;
/// Default number of items in the list.
const DEFAULT_ITEM_COUNT: usize = 6;

/// Resolved settings for one replay run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub viewport: ViewportSize,
    pub item_count: usize,
    pub mode: SwipeMode,
    /// Item focused before the first event.
    pub start_index: usize,
    /// Run with no list attached, so navigation requests are dropped.
    pub detached: bool,
}

/// One partial layer of settings. Unset fields leave the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub viewport: Option<ViewportSize>,
    pub item_count: Option<usize>,
    pub mode: Option<SwipeMode>,
    pub start_index: Option<usize>,
    pub detached: Option<bool>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl ReplayConfig {
    /// Defaults with environment overrides read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            viewport: lookup("LOUPE_VIEWPORT")
                .and_then(|s| parse_viewport(&s).ok())
                .unwrap_or(ViewportSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            item_count: lookup("LOUPE_ITEMS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ITEM_COUNT),
            mode: lookup("LOUPE_MODE")
                .and_then(|s| parse_mode(&s).ok())
                .unwrap_or_default(),
            start_index: 0,
            detached: lookup("LOUPE_DETACHED").is_some(),
        }
    }

    pub fn layered(mut self, layer: &ConfigLayer) -> Self {
        if let Some(viewport) = layer.viewport {
            self.viewport = viewport;
        }
        if let Some(item_count) = layer.item_count {
            self.item_count = item_count;
        }
        if let Some(mode) = layer.mode {
            self.mode = mode;
        }
        if let Some(start_index) = layer.start_index {
            self.start_index = start_index;
        }
        if let Some(detached) = layer.detached {
            self.detached = detached;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ReplayError> {
        let ViewportSize { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ReplayError::InvalidConfig(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }
        if self.item_count == 0 {
            return Err(ReplayError::InvalidConfig(
                "item count must be at least 1".to_string(),
            ));
        }
        if self.start_index >= self.item_count {
            return Err(ReplayError::InvalidConfig(format!(
                "start index {} is outside 0..{}",
                self.start_index, self.item_count
            )));
        }
        Ok(())
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `375x667`.
pub fn parse_viewport(s: &str) -> Result<ViewportSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let width: f32 = w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let height: f32 = h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(format!("viewport must be positive and finite, got `{s}`"));
    }
    Ok(ViewportSize::new(width, height))
}

pub fn parse_mode(s: &str) -> Result<SwipeMode, String> {
    match s.trim() {
        "continuous" => Ok(SwipeMode::Continuous),
        "release-threshold" | "release" => Ok(SwipeMode::ReleaseThreshold),
        other => Err(format!(
            "unknown swipe mode `{other}` (expected `continuous` or `release-threshold`)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ReplayConfig::from_lookup(env(&[]));
        assert_eq!(config.viewport, ViewportSize::new(375.0, 667.0));
        assert_eq!(config.item_count, 6);
        assert_eq!(config.mode, SwipeMode::Continuous);
        assert!(!config.detached);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ReplayConfig::from_lookup(env(&[
            ("LOUPE_VIEWPORT", "400x800"),
            ("LOUPE_ITEMS", "12"),
            ("LOUPE_MODE", "release-threshold"),
            ("LOUPE_DETACHED", "1"),
        ]));
        assert_eq!(config.viewport, ViewportSize::new(400.0, 800.0));
        assert_eq!(config.item_count, 12);
        assert_eq!(config.mode, SwipeMode::ReleaseThreshold);
        assert!(config.detached);
    }

    #[test]
    fn test_unparseable_environment_falls_back() {
        let config = ReplayConfig::from_lookup(env(&[("LOUPE_ITEMS", "many")]));
        assert_eq!(config.item_count, 6);
    }

    #[test]
    fn test_later_layers_win() {
        let header = ConfigLayer {
            item_count: Some(3),
            mode: Some(SwipeMode::ReleaseThreshold),
            ..Default::default()
        };
        let flags = ConfigLayer {
            item_count: Some(9),
            ..Default::default()
        };
        let config = ReplayConfig::from_lookup(env(&[]))
            .layered(&header)
            .layered(&flags);
        assert_eq!(config.item_count, 9);
        assert_eq!(config.mode, SwipeMode::ReleaseThreshold);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let base = ReplayConfig::from_lookup(env(&[]));
        assert!(base.validate().is_ok());

        let empty = ReplayConfig {
            item_count: 0,
            ..base.clone()
        };
        assert!(matches!(empty.validate(), Err(ReplayError::InvalidConfig(_))));

        let out_of_range = ReplayConfig {
            start_index: 6,
            ..base.clone()
        };
        assert!(out_of_range.validate().is_err());

        let flat = ReplayConfig {
            viewport: ViewportSize {
                width: 375.0,
                height: 0.0,
            },
            ..base
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("375x667"), Ok(ViewportSize::new(375.0, 667.0)));
        assert_eq!(parse_viewport(" 10 X 20 "), Ok(ViewportSize::new(10.0, 20.0)));
        assert!(parse_viewport("375").is_err());
        assert!(parse_viewport("axb").is_err());
        assert!(parse_viewport("0x10").is_err());
        assert!(parse_viewport("375x-667").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("continuous"), Ok(SwipeMode::Continuous));
        assert_eq!(parse_mode("release"), Ok(SwipeMode::ReleaseThreshold));
        assert!(parse_mode("fling").is_err());
    }
}
