//! Procedural 2-D tile map generator.
//!
//! Heights come from octave lattice noise, are reshaped by averaging,
//! redistribution and edge falloff, then classified into biomes by ordered
//! height ranges. The result is a [`World`] grid of biome ids.

pub mod biomes;
pub mod export;
pub mod generator;
pub mod noise;
pub mod terrain;

pub use biomes::{BiomeData, BiomeError, BiomeRange, BiomeTable};
pub use generator::{generate, GenerateError, GenerateParams, SeedSpec, WorldGenerator};
pub use noise::{LatticeNoise, NoiseError, NoiseField, SeedTable};
pub use terrain::{GenerationConfig, NormalizedConfig, Point, World};
