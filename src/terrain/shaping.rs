//! Post-processing of raw noise into final cell heights.

use super::config::NormalizedConfig;

/// Divisor/multiplier used by the mid-point averaging curve.
pub const AVERAGING_POWER: f64 = 1.1;

/// Pushes `r` toward the middle of the range.
///
/// Mid-range values move more than extremes, which widens plateaus and
/// removes speckle.
pub fn average_height(r: f64) -> f64 {
    if r > 0.5 {
        r.powf((1.5 - r) / AVERAGING_POWER)
    } else if r < 0.5 {
        r.powf((1.5 - r) * AVERAGING_POWER)
    } else {
        r
    }
}

/// Power-law redistribution. Exponents above 1.0 pull heights toward 0.
#[inline]
pub fn redistribute(r: f64, exponent: f64) -> f64 {
    r.powf(exponent)
}

/// Cubic smoothstep, `3t² - 2t³`.
#[inline]
pub fn smootherstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Attenuation factor for one axis.
///
/// Cells closer to the centre than `radius * (1 - strength)` keep a factor
/// of exactly 1.0; beyond that the factor eases down to 0.0 at the border.
pub fn falloff_factor(position: f64, length: f64, strength: f64) -> f64 {
    let radius = length / 2.0;
    let distance = (radius - position).abs();
    let target = radius * (1.0 - strength);

    if distance < target {
        return 1.0;
    }

    let t = ((distance - target) / radius / (1.0 - target / radius)).clamp(0.0, 1.0);
    1.0 - smootherstep(t)
}

/// Applies averaging, redistribution and edge falloff to a raw noise sample.
///
/// `x` and `y` are grid positions (offset not applied). The result is not
/// clamped; values may fall slightly outside `[0, 1]`.
pub fn shape_height(
    raw: f64,
    config: &NormalizedConfig,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> f64 {
    let mut r = raw;

    if config.height_averaging {
        r = average_height(r);
    }

    r = redistribute(r, config.redistribution_exponent);

    if config.falloff_strength > 0.0 {
        let strength = config.falloff_strength;
        r *= falloff_factor(x as f64, width as f64, strength);
        r *= falloff_factor(y as f64, height as f64, strength);
    }

    r
}
