//! Terrain generation module.
//!
//! Holds the generation parameters, the height shaping curves applied to
//! raw noise, and the [`World`] grid produced by a run.

mod config;
mod shaping;
mod world;

pub use config::{
    sanitize, GenerationConfig, NormalizedConfig, DEFAULT_BORDER_SMOOTHNESS, DEFAULT_FALLOFF,
    DEFAULT_FREQUENCY_CHANGE, DEFAULT_HEIGHT_REDISTRIBUTION, MAX_LATTICE_FREQUENCY, MAX_OCTAVES,
};
pub use shaping::{
    average_height, falloff_factor, redistribute, shape_height, smootherstep, AVERAGING_POWER,
};
pub use world::{Point, World, WorldError, UNCLASSIFIED};
