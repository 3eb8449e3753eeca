//! Export module for saving generated worlds.
//!
//! Biome maps are written as RGBA PNGs, one pixel per cell, colored from
//! each biome's `#rrggbb` string.

mod biome_map;

pub use biome_map::{
    export_world_png, parse_hex_color, world_to_image, BiomeMapError, BiomeMapOptions,
    ColorParseError,
};
