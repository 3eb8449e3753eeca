//! Noise generation module for terrain synthesis.
//!
//! Heights come from classic octave lattice noise: a power-of-two table of
//! weights, bilinear interpolation with cosine easing, and octave doubling.
//! Other backends can be plugged in through [`NoiseField`].

mod lattice;
mod seed_table;

pub use lattice::{
    ease, lattice_noise, LatticeNoise, NoiseField, AMPLITUDE_FALLOFF, BASE_AMPLITUDE, Y_WRAP,
    Y_WRAP_BITS,
};
pub use seed_table::{validate_table_len, NoiseError, SeedTable, DEFAULT_TABLE_LEN};
