//! Stroke configuration: rate limit, density, spacing and randomization ranges.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::brush::{GRID_FILL_THRESHOLD, SPACING_EPSILON};
use crate::error::{Error, Result};

/// Configuration shared by paint and erase strokes.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSettings {
    /// Seconds between strokes while the brush is held.
    pub action_rate: f32,
    /// Scatter attempts per stroke at 100% fill, in 1..=50.
    pub attempts_per_tick: u32,
    /// Fill density in percent. Drives scatter attempts, grid mode and erase thinning.
    pub fill_percentage: f32,
    /// Minimum distance between same-category instances. Also the grid step.
    pub min_spacing: f32,
    /// Whether placed instances are queried for spacing at all.
    pub spacing_enabled: bool,
    /// Lower bound of the random uniform scale.
    pub min_scale: f32,
    /// Upper bound of the random uniform scale.
    pub max_scale: f32,
    /// Randomize yaw over the full circle.
    pub random_spin: bool,
    /// Maximum tilt in degrees about X and Z, in 0..=90.
    pub max_tilt: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            action_rate: 0.1,
            attempts_per_tick: 10,
            fill_percentage: 50.0,
            min_spacing: 1.5,
            spacing_enabled: true,
            min_scale: 0.8,
            max_scale: 1.5,
            random_spin: true,
            max_tilt: 10.0,
        }
    }
}

impl BrushSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action_rate(mut self, action_rate: f32) -> Self {
        self.action_rate = action_rate;
        self
    }

    pub fn with_attempts_per_tick(mut self, attempts_per_tick: u32) -> Self {
        self.attempts_per_tick = attempts_per_tick;
        self
    }

    pub fn with_fill_percentage(mut self, fill_percentage: f32) -> Self {
        self.fill_percentage = fill_percentage;
        self
    }

    pub fn with_min_spacing(mut self, min_spacing: f32) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn with_spacing_enabled(mut self, spacing_enabled: bool) -> Self {
        self.spacing_enabled = spacing_enabled;
        self
    }

    pub fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_random_spin(mut self, random_spin: bool) -> Self {
        self.random_spin = random_spin;
        self
    }

    pub fn with_max_tilt(mut self, max_tilt: f32) -> Self {
        self.max_tilt = max_tilt;
        self
    }

    /// Whether paint strokes tile a lattice instead of scattering.
    pub fn uses_grid(&self) -> bool {
        self.fill_percentage >= GRID_FILL_THRESHOLD
    }

    /// Whether candidates are checked against nearby same-category instances.
    pub fn checks_spacing(&self) -> bool {
        self.spacing_enabled && self.min_spacing > SPACING_EPSILON
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.action_rate.is_finite() || self.action_rate < 0.0 {
            return Err(Error::InvalidConfig(
                "action_rate must be finite and >= 0".into(),
            ));
        }
        if !(1..=50).contains(&self.attempts_per_tick) {
            return Err(Error::InvalidConfig(
                "attempts_per_tick must be in 1..=50".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.fill_percentage) {
            return Err(Error::InvalidConfig(
                "fill_percentage must be in 0..=100".into(),
            ));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(Error::InvalidConfig(
                "min_spacing must be finite and >= 0".into(),
            ));
        }
        if self.min_scale.is_nan() || self.min_scale <= 0.0 || !self.max_scale.is_finite() {
            return Err(Error::InvalidConfig(
                "scale range must be positive and finite".into(),
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(Error::InvalidConfig(
                "min_scale must be <= max_scale".into(),
            ));
        }
        if !(0.0..=90.0).contains(&self.max_tilt) {
            return Err(Error::InvalidConfig("max_tilt must be in 0..=90".into()));
        }

        Ok(())
    }
}
