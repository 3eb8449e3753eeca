//! Generation parameters and their normalization into noise constants.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default for [`GenerationConfig::frequency_change`].
pub const DEFAULT_FREQUENCY_CHANGE: f64 = 0.3;
/// Default for [`GenerationConfig::border_smoothness`].
pub const DEFAULT_BORDER_SMOOTHNESS: f64 = 0.5;
/// Default for [`GenerationConfig::height_redistribution`].
pub const DEFAULT_HEIGHT_REDISTRIBUTION: f64 = 1.0;
/// Default for [`GenerationConfig::falloff`].
pub const DEFAULT_FALLOFF: f64 = 0.0;

/// Highest lattice frequency reachable from `frequency_change = 1`.
pub const MAX_LATTICE_FREQUENCY: u32 = 32;
/// Highest octave count reachable from `border_smoothness = 0`.
pub const MAX_OCTAVES: u32 = 15;

/// User-facing knobs for one generation run.
///
/// Every bounded field is lenient: NaN, infinite or out-of-range values fall
/// back to the field default during normalization instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,

    /// How often biome transitions occur across the map (0.0-1.0).
    ///
    /// 0.0 gives a few broad regions, 1.0 the busiest map.
    pub frequency_change: f64,

    /// Softness of biome borders (0.0-1.0).
    ///
    /// 0.0 gives sharp, detailed borders; 1.0 smooth, barely visible ones.
    pub border_smoothness: f64,

    /// Exponent shaping the height distribution (0.5-1.5, 1.0 is neutral).
    ///
    /// Higher values push terrain toward low biomes.
    pub height_redistribution: f64,

    /// Strength of edge attenuation (0.0-0.9, 0.0 disables it).
    pub falloff: f64,

    /// Compress heights toward the middle before redistribution.
    ///
    /// `None` means unset and is treated as enabled.
    pub height_averaging: Option<bool>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            frequency_change: DEFAULT_FREQUENCY_CHANGE,
            border_smoothness: DEFAULT_BORDER_SMOOTHNESS,
            height_redistribution: DEFAULT_HEIGHT_REDISTRIBUTION,
            falloff: DEFAULT_FALLOFF,
            height_averaging: None,
        }
    }
}

/// Returns `value` if it is finite and inside `[min, max]`, else `default`.
pub fn sanitize(value: f64, default: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() && value >= min && value <= max {
        value
    } else {
        default
    }
}

fn sanitize_field(name: &str, value: f64, default: f64, min: f64, max: f64) -> f64 {
    let sanitized = sanitize(value, default, min, max);
    if sanitized.to_bits() != value.to_bits() {
        debug!(
            field = name,
            value,
            default,
            "config value outside [{}, {}], using default",
            min,
            max
        );
    }
    sanitized
}

impl GenerationConfig {
    /// Creates a config with the given extent and default knobs.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Replaces invalid knobs with their defaults and resolves an unset
    /// averaging flag. Idempotent.
    pub fn sanitized(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            frequency_change: sanitize_field(
                "frequency_change",
                self.frequency_change,
                DEFAULT_FREQUENCY_CHANGE,
                0.0,
                1.0,
            ),
            border_smoothness: sanitize_field(
                "border_smoothness",
                self.border_smoothness,
                DEFAULT_BORDER_SMOOTHNESS,
                0.0,
                1.0,
            ),
            height_redistribution: sanitize_field(
                "height_redistribution",
                self.height_redistribution,
                DEFAULT_HEIGHT_REDISTRIBUTION,
                0.5,
                1.5,
            ),
            falloff: sanitize_field("falloff", self.falloff, DEFAULT_FALLOFF, 0.0, 0.9),
            height_averaging: Some(self.height_averaging.unwrap_or(true)),
        }
    }

    /// Maps the knobs onto the constants used by the noise evaluator and
    /// height shaper.
    pub fn normalize(&self) -> NormalizedConfig {
        NormalizedConfig::from(self)
    }
}

/// Internal constants derived from a [`GenerationConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedConfig {
    /// Noise octaves, 1..=15. Smoother borders use fewer octaves.
    pub octave_count: u32,
    /// Lattice cells spanned by the map, 1..=32.
    pub lattice_frequency: u32,
    /// Power applied to every height. Used as configured, so values above
    /// 1.0 lower the terrain.
    pub redistribution_exponent: f64,
    /// Edge attenuation strength, 0.0..=0.9.
    pub falloff_strength: f64,
    pub height_averaging: bool,
}

impl From<&GenerationConfig> for NormalizedConfig {
    fn from(config: &GenerationConfig) -> Self {
        let config = config.sanitized();

        let lattice_frequency = (config.frequency_change * 31.0 + 1.0).round() as u32;
        let octave_count = ((1.0 - config.border_smoothness) * 14.0 + 1.0).round() as u32;

        Self {
            octave_count,
            lattice_frequency,
            redistribution_exponent: config.height_redistribution,
            falloff_strength: config.falloff,
            height_averaging: config.height_averaging.unwrap_or(true),
        }
    }
}
