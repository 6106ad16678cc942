//! Importance mapping from normalized brightness.
//!
//! Darker cells score higher, with three corrections on top of plain inversion:
//! - both brightness tails are pulled toward [`ImportanceParams::extreme_downweight`]
//!   by one-sided Gaussian falloffs, combined with a pointwise minimum;
//! - a Gaussian bump around [`ImportanceParams::mid_tone_center`] multiplies the result
//!   by up to [`ImportanceParams::mid_tone_boost`];
//! - the grid is min/max rescaled to `[0, 1]`, collapsing to all `1.0` when flat.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::field::Grid;

/// Constants of the importance mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportanceParams {
    /// Weight floor approached deep inside either tail.
    pub extreme_downweight: f32,
    /// Brightness below which the dark falloff applies.
    pub dark_threshold: f32,
    /// Brightness above which the light falloff applies.
    pub light_threshold: f32,
    pub dark_sigma: f32,
    pub light_sigma: f32,
    /// Brightness receiving the full mid-tone boost.
    pub mid_tone_center: f32,
    pub mid_tone_sigma: f32,
    /// Multiplier at the mid-tone center; `1.0` disables the boost.
    pub mid_tone_boost: f32,
}

impl Default for ImportanceParams {
    fn default() -> Self {
        Self {
            extreme_downweight: 0.3,
            dark_threshold: 0.2,
            light_threshold: 0.8,
            dark_sigma: 0.15,
            light_sigma: 0.15,
            mid_tone_center: 0.65,
            mid_tone_sigma: 0.2,
            mid_tone_boost: 1.5,
        }
    }
}

impl ImportanceParams {
    pub fn with_extreme_downweight(mut self, v: f32) -> Self {
        self.extreme_downweight = v;
        self
    }

    /// Sets both tail thresholds.
    pub fn with_thresholds(mut self, dark: f32, light: f32) -> Self {
        self.dark_threshold = dark;
        self.light_threshold = light;
        self
    }

    /// Sets both tail falloff sigmas.
    pub fn with_tail_sigmas(mut self, dark: f32, light: f32) -> Self {
        self.dark_sigma = dark;
        self.light_sigma = light;
        self
    }

    /// Sets center, sigma, and peak factor of the mid-tone boost.
    pub fn with_mid_tone(mut self, center: f32, sigma: f32, boost: f32) -> Self {
        self.mid_tone_center = center;
        self.mid_tone_sigma = sigma;
        self.mid_tone_boost = boost;
        self
    }

    /// Validates the parameters, returning an error if any is unusable.
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("extreme_downweight", self.extreme_downweight),
            ("dark_threshold", self.dark_threshold),
            ("light_threshold", self.light_threshold),
            ("dark_sigma", self.dark_sigma),
            ("light_sigma", self.light_sigma),
            ("mid_tone_center", self.mid_tone_center),
            ("mid_tone_sigma", self.mid_tone_sigma),
            ("mid_tone_boost", self.mid_tone_boost),
        ];
        if let Some((name, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{name} must be finite")));
        }
        for (name, sigma) in [
            ("dark_sigma", self.dark_sigma),
            ("light_sigma", self.light_sigma),
            ("mid_tone_sigma", self.mid_tone_sigma),
        ] {
            if sigma <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }

    /// Combined tail weight for one brightness value, in `[extreme_downweight, 1]`.
    pub fn extreme_weight(&self, brightness: f32) -> f32 {
        let floor = self.extreme_downweight;
        let dark = if brightness >= self.dark_threshold {
            1.0
        } else {
            let d = (self.dark_threshold - brightness) / self.dark_sigma;
            floor + (1.0 - floor) * (-0.5 * d * d).exp()
        };
        let light = if brightness <= self.light_threshold {
            1.0
        } else {
            let d = (brightness - self.light_threshold) / self.light_sigma;
            floor + (1.0 - floor) * (-0.5 * d * d).exp()
        };
        dark.min(light)
    }

    /// Mid-tone multiplier for one brightness value, in `[1, mid_tone_boost]`.
    pub fn mid_tone_factor(&self, brightness: f32) -> f32 {
        let d = (brightness - self.mid_tone_center) / self.mid_tone_sigma;
        1.0 + (self.mid_tone_boost - 1.0) * (-0.5 * d * d).exp()
    }

    /// Importance before the final rescale.
    pub fn raw_importance(&self, brightness: f32) -> f32 {
        (1.0 - brightness) * self.extreme_weight(brightness) * self.mid_tone_factor(brightness)
    }
}

/// Map a brightness grid (values in `[0, 1]`) to a normalized importance grid.
pub fn compute_importance(brightness: &Grid, params: &ImportanceParams) -> Result<Grid> {
    params.validate()?;

    let raw = brightness.map(|b| params.raw_importance(b));
    let Some((lo, hi)) = raw.min_max() else {
        return Ok(raw);
    };

    if hi > lo {
        let range = hi - lo;
        Ok(raw.map(|v| ((v - lo) / range).clamp(0.0, 1.0)))
    } else {
        warn!(
            "Importance has zero dynamic range ({}x{}); using uniform 1.0.",
            raw.height(),
            raw.width()
        );
        Ok(Grid::filled(raw.height(), raw.width(), 1.0))
    }
}
