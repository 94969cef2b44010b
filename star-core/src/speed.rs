//! Mapping from the speed control to a transition duration.

use crate::config::SpeedConfig;

/// Logarithmic speed scale.
///
/// The control range `min..=max` is mapped geometrically onto
/// `slowest_ms..=fastest_ms`, so every step of the control changes the
/// duration by the same ratio. Higher speed always means a shorter
/// (never zero) duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedScale {
    min: u32,
    max: u32,
    slowest_ms: f32,
    fastest_ms: f32,
}

impl SpeedScale {
    pub fn new(min: u32, max: u32, slowest_ms: f32, fastest_ms: f32) -> Self {
        Self {
            min,
            max,
            slowest_ms,
            fastest_ms,
        }
    }

    pub fn from_config(cfg: &SpeedConfig) -> Self {
        Self::new(cfg.min, cfg.max, cfg.slowest_ms, cfg.fastest_ms)
    }

    /// Returns the transition duration in milliseconds for `speed`.
    ///
    /// Values outside the control range are clamped first.
    pub fn duration_ms(&self, speed: u32) -> f32 {
        let speed = speed.clamp(self.min, self.max.max(self.min));
        let span = self.max.saturating_sub(self.min);
        let t = if span == 0 {
            0.0
        } else {
            (speed - self.min) as f32 / span as f32
        };

        self.slowest_ms * (self.fastest_ms / self.slowest_ms).powf(t)
    }
}

impl Default for SpeedScale {
    fn default() -> Self {
        Self::from_config(&SpeedConfig::default())
    }
}

/// Duration for `speed` under the default scale (1..=100 → 4000..=250 ms).
pub fn speed_to_duration(speed: u32) -> f32 {
    SpeedScale::default().duration_ms(speed)
}
