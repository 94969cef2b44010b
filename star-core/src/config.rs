use std::{ops::RangeInclusive, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarError};

/// Top-level configuration for the star animation.
///
/// Every section falls back to its defaults when missing from a JSON
/// document, so a config file only needs the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub points: PointsConfig,
    pub speed: SpeedConfig,
    pub style: StyleConfig,
    pub ui: UiConfig,
}

/// Bounds and initial value of the point-count control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            min: 2,
            max: 30,
            default: 16,
        }
    }
}

impl PointsConfig {
    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    pub fn clamp(&self, count: usize) -> usize {
        count.clamp(self.min, self.max)
    }
}

/// Bounds of the speed control and the durations its ends map to.
///
/// `slowest_ms` is the transition duration at `min`, `fastest_ms` the one at
/// `max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub min: u32,
    pub max: u32,
    pub default: u32,
    pub slowest_ms: f32,
    pub fastest_ms: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            default: 25,
            slowest_ms: 4000.0,
            fastest_ms: 250.0,
        }
    }
}

impl SpeedConfig {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    pub fn clamp(&self, speed: u32) -> u32 {
        speed.clamp(self.min, self.max)
    }
}

/// Sizes used by the renderer, in logical pixels unless noted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Star radius as a fraction of the shorter surface side.
    pub radius_fraction: f32,
    /// Label circle radius relative to the star radius.
    pub label_radius_factor: f32,
    pub attractor_radius: f32,
    pub line_width: f32,
    pub label_size: f32,
    pub highlight_label_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.4,
            label_radius_factor: 1.15,
            attractor_radius: 10.0,
            line_width: 1.0,
            label_size: 16.0,
            highlight_label_size: 20.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds without pointer movement before the controls hide.
    pub hide_after_secs: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hide_after_secs: 3.0,
        }
    }
}

impl Config {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every range and size for consistency.
    ///
    /// ### Returns
    /// - `Ok(())` if the config can drive the animation.
    /// - `Err(StarError::InvalidConfig)` naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        let p = &self.points;
        if p.min < 2 {
            return Err(StarError::invalid_config(format!(
                "points.min must be at least 2, got {}",
                p.min
            )));
        }
        if p.min > p.max {
            return Err(StarError::invalid_config(format!(
                "points.min ({}) exceeds points.max ({})",
                p.min, p.max
            )));
        }
        if !p.range().contains(&p.default) {
            return Err(StarError::invalid_config(format!(
                "points.default ({}) is outside {}..={}",
                p.default, p.min, p.max
            )));
        }

        let s = &self.speed;
        if s.min > s.max {
            return Err(StarError::invalid_config(format!(
                "speed.min ({}) exceeds speed.max ({})",
                s.min, s.max
            )));
        }
        if !s.range().contains(&s.default) {
            return Err(StarError::invalid_config(format!(
                "speed.default ({}) is outside {}..={}",
                s.default, s.min, s.max
            )));
        }
        if !(s.fastest_ms.is_finite() && s.fastest_ms > 0.0) {
            return Err(StarError::invalid_config("speed.fastest_ms must be > 0"));
        }
        if !(s.slowest_ms.is_finite() && s.slowest_ms > 0.0) {
            return Err(StarError::invalid_config("speed.slowest_ms must be > 0"));
        }
        if s.fastest_ms > s.slowest_ms {
            return Err(StarError::invalid_config(
                "speed.fastest_ms must not exceed speed.slowest_ms",
            ));
        }

        let st = &self.style;
        let sizes = [
            ("style.radius_fraction", st.radius_fraction),
            ("style.label_radius_factor", st.label_radius_factor),
            ("style.attractor_radius", st.attractor_radius),
            ("style.line_width", st.line_width),
            ("style.label_size", st.label_size),
            ("style.highlight_label_size", st.highlight_label_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(StarError::invalid_config(format!("{name} must be > 0")));
        }

        if !(self.ui.hide_after_secs.is_finite() && self.ui.hide_after_secs >= 0.0) {
            return Err(StarError::invalid_config("ui.hide_after_secs must be >= 0"));
        }

        Ok(())
    }
}
