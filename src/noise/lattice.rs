//! Multi-octave interpolated lattice noise.

use std::f64::consts::PI;

use super::seed_table::SeedTable;
use crate::terrain::NormalizedConfig;

/// Shift applied to the Y lattice index when flattening into the table.
pub const Y_WRAP_BITS: u32 = 4;
/// Table distance between vertically adjacent lattice points.
pub const Y_WRAP: i64 = 1 << Y_WRAP_BITS;
/// Amplitude multiplier applied after every octave.
pub const AMPLITUDE_FALLOFF: f64 = 0.5;
/// Amplitude of the first octave.
pub const BASE_AMPLITUDE: f64 = 0.5;

/// A scalar height field sampled on the integer grid.
///
/// Implementations must be pure: the same arguments always produce the same
/// value, which lets the generator evaluate cells in any order and on any
/// thread.
pub trait NoiseField: Send + Sync {
    /// Samples the field at lattice coordinate `(x, y)` for a map of
    /// `width` x `height` cells.
    ///
    /// Returns a value roughly in `[0, 1]`; callers must not rely on exact
    /// bounds.
    fn evaluate(&self, x: i64, y: i64, width: u32, height: u32) -> f64;

    /// Returns the name of this field for logging.
    fn name(&self) -> &'static str {
        "NoiseField"
    }
}

/// Raised-cosine easing with zero slope at both ends.
#[inline]
pub fn ease(t: f64) -> f64 {
    0.5 * (1.0 - (t * PI).cos())
}

/// Samples octave lattice noise at continuous lattice coordinates.
///
/// Returns the raw octave sum. With weights in `[0, 1]` the result stays
/// below `1 - 0.5^octaves`; zero octaves yield `0.0`.
pub fn lattice_noise(table: &SeedTable, octaves: u32, x: f64, y: f64) -> f64 {
    let x_floor = x.floor();
    let y_floor = y.floor();
    let mut xi = x_floor as i64;
    let mut yi = y_floor as i64;
    let mut xf = x - x_floor;
    let mut yf = y - y_floor;

    let mut sum = 0.0;
    let mut amplitude = BASE_AMPLITUDE;

    for _ in 0..octaves {
        let offset = xi.wrapping_add(yi.wrapping_shl(Y_WRAP_BITS));

        let rx = ease(xf);
        let ry = ease(yf);

        let mut n1 = table.at(offset);
        n1 += rx * (table.at(offset.wrapping_add(1)) - n1);
        let mut n2 = table.at(offset.wrapping_add(Y_WRAP));
        n2 += rx * (table.at(offset.wrapping_add(Y_WRAP + 1)) - n2);
        n1 += ry * (n2 - n1);

        sum += n1 * amplitude;
        amplitude *= AMPLITUDE_FALLOFF;

        xi = xi.wrapping_shl(1);
        xf *= 2.0;
        yi = yi.wrapping_shl(1);
        yf *= 2.0;

        // Carry the doubled fraction so the next octave stays lattice aligned.
        if xf >= 1.0 {
            xi = xi.wrapping_add(1);
            xf -= 1.0;
        }
        if yf >= 1.0 {
            yi = yi.wrapping_add(1);
            yf -= 1.0;
        }
    }

    sum
}

/// Classic octave lattice noise over a [`SeedTable`].
#[derive(Debug, Clone)]
pub struct LatticeNoise {
    table: SeedTable,
    octaves: u32,
    lattice_frequency: u32,
}

impl LatticeNoise {
    pub fn new(table: SeedTable, octaves: u32, lattice_frequency: u32) -> Self {
        Self {
            table,
            octaves,
            lattice_frequency,
        }
    }

    /// Builds an evaluator using the octave count and frequency of `config`.
    pub fn from_config(table: SeedTable, config: &NormalizedConfig) -> Self {
        Self::new(table, config.octave_count, config.lattice_frequency)
    }

    pub fn table(&self) -> &SeedTable {
        &self.table
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn lattice_frequency(&self) -> u32 {
        self.lattice_frequency
    }

    /// Samples at continuous lattice coordinates.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        lattice_noise(&self.table, self.octaves, x, y)
    }
}

impl NoiseField for LatticeNoise {
    fn evaluate(&self, x: i64, y: i64, width: u32, height: u32) -> f64 {
        if width == 0 || height == 0 {
            return 0.0;
        }
        let frequency = self.lattice_frequency as f64;
        let cx = x as f64 / width as f64 * frequency;
        let cy = y as f64 / height as f64 * frequency;
        self.sample(cx, cy)
    }

    fn name(&self) -> &'static str {
        "LatticeNoise"
    }
}
