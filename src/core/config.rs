//! Configuration for scale limits, scroll behaviour and slide animations
//!
//! Configurations come either from a preset profile or from a custom
//! `MapViewConfig`, which can also be deserialized from JSON.

use crate::{
    animation::easing::EasingType,
    core::constants::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_SLIDE_DURATION_MS},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MapViewProfile {
    Balanced,
    Snappy,
    Cinematic,
    Custom(MapViewConfig),
}

impl MapViewProfile {
    pub fn resolve(&self) -> MapViewConfig {
        match self {
            Self::Balanced => MapViewConfig::default(),
            Self::Snappy => MapViewConfig {
                slide: SlideConfig {
                    enable_transitions: true,
                    duration_ms: 200,
                    easing: EasingType::EaseOut,
                },
                ..MapViewConfig::default()
            },
            Self::Cinematic => MapViewConfig {
                slide: SlideConfig {
                    enable_transitions: true,
                    duration_ms: 800,
                    easing: EasingType::UltraSmooth,
                },
                ..MapViewConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for MapViewProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Keep the visible window on the content when scrolling
    pub constrain_scroll: bool,
    pub slide: SlideConfig,
}

impl MapViewConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MapViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(MapError::InvalidConfig(format!(
                "max_scale must be finite and at least min_scale ({}), got {}",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            constrain_scroll: false,
            slide: SlideConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// When false, slides jump straight to their target
    pub enable_transitions: bool,
    pub duration_ms: u64,
    pub easing: EasingType,
}

impl SlideConfig {
    pub fn duration(&self) -> Duration {
        if self.enable_transitions {
            Duration::from_millis(self.duration_ms)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            enable_transitions: true,
            duration_ms: DEFAULT_SLIDE_DURATION_MS,
            easing: EasingType::EaseInOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_presets() {
        let balanced = MapViewProfile::Balanced.resolve();
        let snappy = MapViewProfile::Snappy.resolve();
        let cinematic = MapViewProfile::Cinematic.resolve();

        assert_eq!(balanced.slide.duration_ms, DEFAULT_SLIDE_DURATION_MS);
        assert!(snappy.slide.duration_ms < balanced.slide.duration_ms);
        assert!(cinematic.slide.duration_ms > balanced.slide.duration_ms);
        assert_eq!(cinematic.min_scale, balanced.min_scale);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = MapViewConfig::from_json(r#"{ "max_scale": 8.0, "slide": { "easing": "Linear" } }"#)
            .unwrap();

        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.slide.easing, EasingType::Linear);
        assert_eq!(config.slide.duration_ms, DEFAULT_SLIDE_DURATION_MS);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = MapViewProfile::Snappy.resolve();
        let parsed = MapViewConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            MapViewConfig::from_json(r#"{ "min_scale": 0.0 }"#),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(matches!(
            MapViewConfig::from_json(r#"{ "min_scale": 2.0, "max_scale": 1.0 }"#),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(matches!(
            MapViewConfig::from_json("not json"),
            Err(MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_disabled_transitions_have_zero_duration() {
        let slide = SlideConfig {
            enable_transitions: false,
            ..SlideConfig::default()
        };
        assert_eq!(slide.duration(), Duration::ZERO);
    }
}
