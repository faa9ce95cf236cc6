//! Slider configuration.
//!
//! Configuration is immutable after initialization. It can come from two
//! places: a serde-compatible config section embedded in the host's own
//! config file, or the flat attribute map a markup host hands over at
//! attach time (`SliderConfig::from_attributes`).

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Panels visible at once, per breakpoint
    #[serde(default)]
    pub per_view: PerViewConfig,
    /// Fake infinite circular scrolling with boundary clones
    #[serde(default)]
    pub infinite_loop: bool,
    /// Timed automatic advancement
    #[serde(default)]
    pub autoplay: bool,
    /// Delay between autoplay advances
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// Drag/flick decision thresholds
    #[serde(default)]
    pub gesture: GestureConfig,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            per_view: PerViewConfig::default(),
            infinite_loop: false,
            autoplay: false,
            autoplay_interval_ms: default_autoplay_interval_ms(),
            gesture: GestureConfig::default(),
        }
    }
}

/// Panels shown per viewport, by breakpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerViewConfig {
    #[serde(default = "default_per_view")]
    pub desktop: u32,
    #[serde(default = "default_per_view")]
    pub tablet: u32,
    #[serde(default = "default_per_view")]
    pub mobile: u32,
}

impl Default for PerViewConfig {
    fn default() -> Self {
        Self {
            desktop: default_per_view(),
            tablet: default_per_view(),
            mobile: default_per_view(),
        }
    }
}

/// Thresholds for the drag-end advance decision and autoplay resumption.
///
/// These are policy values, not structural requirements. The defaults model
/// both deliberate long drags (distance) and fast flicks (velocity); either
/// condition alone is enough to advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum dragged distance (offset units) to advance one step
    #[serde(default = "default_advance_distance")]
    pub advance_distance: f32,
    /// Minimum drag velocity (offset units per ms) to advance one step
    #[serde(default = "default_flick_velocity")]
    pub flick_velocity: f32,
    /// Grace period after a drag ends before autoplay resumes
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            advance_distance: default_advance_distance(),
            flick_velocity: default_flick_velocity(),
            resume_delay_ms: default_resume_delay_ms(),
        }
    }
}

impl SliderConfig {
    /// Build a config from the flat attribute map a host supplies at attach
    /// time.
    ///
    /// `auto-loop` and `infinite-loop` are presence flags. The per-view
    /// attributes must be positive integers; an absent attribute silently
    /// takes the default of 1, an invalid one is logged and falls back to 1.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Self {
        let per_view = PerViewConfig {
            desktop: per_view_attribute(attrs, "desktop-per-view"),
            tablet: per_view_attribute(attrs, "tablet-per-view"),
            mobile: per_view_attribute(attrs, "mobile-per-view"),
        };

        let autoplay_interval_ms = match attrs.get("autoplay-interval-ms") {
            None => default_autoplay_interval_ms(),
            Some(raw) => match parse_positive(raw) {
                Ok(ms) => ms as u64,
                Err(_) => {
                    warn!(
                        "invalid autoplay-interval-ms '{}', using {}ms",
                        raw,
                        default_autoplay_interval_ms()
                    );
                    default_autoplay_interval_ms()
                }
            },
        };

        Self {
            per_view,
            infinite_loop: attrs.contains_key("infinite-loop"),
            autoplay: attrs.contains_key("auto-loop"),
            autoplay_interval_ms,
            gesture: GestureConfig::default(),
        }
    }

    /// Clone padding at each end of the sequence: the largest configured
    /// per-view count across breakpoints.
    pub fn clone_width(&self) -> usize {
        self.per_view
            .desktop
            .max(self.per_view.tablet)
            .max(self.per_view.mobile) as usize
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

impl GestureConfig {
    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }
}

/// Parse one per-view attribute, recovering to the default of 1 on
/// zero/negative or unparsable values.
fn per_view_attribute(attrs: &HashMap<String, String>, key: &str) -> u32 {
    let Some(raw) = attrs.get(key) else {
        return default_per_view();
    };
    match parse_positive(raw).map_err(|value| Error::Config {
        attribute: key.to_string(),
        value,
    }) {
        Ok(count) => count,
        Err(e) => {
            warn!("{e}, falling back to {}", default_per_view());
            default_per_view()
        }
    }
}

fn parse_positive(raw: &str) -> std::result::Result<u32, String> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as u32),
        _ => Err(raw.to_string()),
    }
}

fn default_per_view() -> u32 {
    1
}

fn default_autoplay_interval_ms() -> u64 {
    3000
}

fn default_advance_distance() -> f32 {
    25.0
}

fn default_flick_velocity() -> f32 {
    0.5
}

fn default_resume_delay_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.per_view.desktop, 1);
        assert_eq!(config.per_view.tablet, 1);
        assert_eq!(config.per_view.mobile, 1);
        assert!(!config.infinite_loop);
        assert!(!config.autoplay);
        assert_eq!(config.autoplay_interval_ms, 3000);
        assert_eq!(config.clone_width(), 1);
    }

    #[test]
    fn test_from_attributes_flags() {
        let config = SliderConfig::from_attributes(&attrs(&[
            ("auto-loop", ""),
            ("infinite-loop", ""),
        ]));
        assert!(config.autoplay);
        assert!(config.infinite_loop);

        let config = SliderConfig::from_attributes(&attrs(&[]));
        assert!(!config.autoplay);
        assert!(!config.infinite_loop);
    }

    #[test]
    fn test_from_attributes_per_view() {
        let config = SliderConfig::from_attributes(&attrs(&[
            ("desktop-per-view", "4"),
            ("tablet-per-view", "2"),
        ]));
        assert_eq!(config.per_view.desktop, 4);
        assert_eq!(config.per_view.tablet, 2);
        assert_eq!(config.per_view.mobile, 1); // absent, default
        assert_eq!(config.clone_width(), 4);
    }

    #[test]
    fn test_invalid_per_view_falls_back_to_one() {
        for bad in ["0", "-3", "abc", ""] {
            let config =
                SliderConfig::from_attributes(&attrs(&[("desktop-per-view", bad)]));
            assert_eq!(config.per_view.desktop, 1, "value '{bad}'");
        }
    }

    #[test]
    fn test_invalid_interval_falls_back() {
        let config =
            SliderConfig::from_attributes(&attrs(&[("autoplay-interval-ms", "0")]));
        assert_eq!(config.autoplay_interval_ms, 3000);

        let config =
            SliderConfig::from_attributes(&attrs(&[("autoplay-interval-ms", "1500")]));
        assert_eq!(config.autoplay_interval_ms, 1500);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: SliderConfig = toml::from_str(
            r#"
            infinite_loop = true
            autoplay = true
            autoplay_interval_ms = 2000

            [per_view]
            desktop = 3

            [gesture]
            advance_distance = 40.0
            "#,
        )
        .unwrap();

        assert!(config.infinite_loop);
        assert!(config.autoplay);
        assert_eq!(config.autoplay_interval_ms, 2000);
        assert_eq!(config.per_view.desktop, 3);
        assert_eq!(config.per_view.tablet, 1); // defaulted
        assert!((config.gesture.advance_distance - 40.0).abs() < f32::EPSILON);
        assert!((config.gesture.flick_velocity - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.gesture.resume_delay_ms, 5000);
    }

    #[test]
    fn test_gesture_defaults() {
        let gesture = GestureConfig::default();
        assert!((gesture.advance_distance - 25.0).abs() < f32::EPSILON);
        assert!((gesture.flick_velocity - 0.5).abs() < f32::EPSILON);
        assert_eq!(gesture.resume_delay(), Duration::from_millis(5000));
    }
}
