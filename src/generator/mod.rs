//! World generation entry points.
//!
//! [`generate`] resolves the seed table, then evaluates noise, shaping and
//! biome classification for every cell of the grid.

mod params;
mod world_generator;

pub use params::{GenerateParams, SeedSpec};
pub use world_generator::{generate, generate_with_field, GenerateError, WorldGenerator};
