use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RippleError, RippleResult};
use crate::wave::animator::WaveParams;

const MAX_GRID_RESOLUTION: i64 = 512;
const MAX_BAND_COUNT: i64 = 64;

/// User-facing ripple configuration, as read from JSON or built in code.
///
/// Values are accepted as-is and clamped by [`RippleConfig::sanitized`]; nothing here is ever
/// rejected for being out of range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleConfig {
    /// Cells along the longer surface edge.
    pub grid_resolution: i64,
    /// Percentage of grid slots that receive a cell, `0..=100`.
    pub density: f64,
    /// Fill color for visible cells.
    pub fill_color: Rgba8,
    /// Total sweep duration in milliseconds.
    pub duration_ms: f64,
    /// Number of concentric distance bands.
    pub band_count: i64,
    /// Width of the visible wave, in bands.
    pub wave_width: f64,
    /// Multiplier applied to `(jitter - 0.5)` to roughen the wave front.
    pub jitter_spread: f64,
    /// Candidates become visible only when their jitter exceeds this value.
    pub visibility_threshold: f64,
    /// Seed for cell jitter and membership. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Opacity tween length for the node renderer, in milliseconds.
    pub node_tween_ms: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        let wave = WaveParams::default();
        Self {
            grid_resolution: 10,
            density: 100.0,
            fill_color: Rgba8::WHITE,
            duration_ms: 300.0,
            band_count: i64::from(wave.band_count),
            wave_width: wave.wave_width,
            jitter_spread: wave.jitter_spread,
            visibility_threshold: wave.visibility_threshold,
            seed: None,
            node_tween_ms: 80.0,
        }
    }
}

/// Validated engine settings derived from a [`RippleConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleSettings {
    /// Cells along the longer surface edge, `>= 1`.
    pub grid_resolution: u32,
    /// Cell inclusion percentage in `[0, 100]`.
    pub density: f64,
    /// Fill color for visible cells.
    pub fill_color: Rgba8,
    /// Total sweep duration in milliseconds, `>= 0`.
    pub duration_ms: f64,
    /// Wave shape parameters.
    pub wave: WaveParams,
    /// Optional deterministic seed.
    pub seed: Option<u64>,
    /// Node renderer tween length in milliseconds, `>= 0`.
    pub node_tween_ms: f64,
}

impl RippleSettings {
    /// Whether switching from `self` to `other` requires rebuilding the cell grid.
    pub fn grid_changed(&self, other: &Self) -> bool {
        self.grid_resolution != other.grid_resolution
            || self.density.to_bits() != other.density.to_bits()
            || self.seed != other.seed
    }
}

impl Default for RippleSettings {
    fn default() -> Self {
        RippleConfig::default().sanitized()
    }
}

impl RippleConfig {
    /// Parse a JSON config document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> RippleResult<Self> {
        serde_json::from_str(s).map_err(|e| RippleError::serde(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> RippleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RippleError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> RippleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RippleError::serde(e.to_string()))
    }

    /// Clamp every field into its valid range.
    pub fn sanitized(&self) -> RippleSettings {
        let defaults = WaveParams::default();
        let band_count = self.band_count.clamp(1, MAX_BAND_COUNT) as u32;
        let wave = WaveParams {
            band_count,
            wave_width: finite_or(self.wave_width, defaults.wave_width)
                .clamp(0.01, f64::from(band_count) + defaults.wave_width),
            jitter_spread: finite_or(self.jitter_spread, defaults.jitter_spread).clamp(0.0, 10.0),
            visibility_threshold: finite_or(
                self.visibility_threshold,
                defaults.visibility_threshold,
            )
            .clamp(0.0, 1.0),
        };
        RippleSettings {
            grid_resolution: self.grid_resolution.clamp(1, MAX_GRID_RESOLUTION) as u32,
            density: finite_or(self.density, 100.0).clamp(0.0, 100.0),
            fill_color: self.fill_color,
            duration_ms: finite_or(self.duration_ms, 300.0).max(0.0),
            wave,
            seed: self.seed,
            node_tween_ms: finite_or(self.node_tween_ms, 80.0).max(0.0),
        }
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
