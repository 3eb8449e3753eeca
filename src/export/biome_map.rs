//! Biome map export as RGBA PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;
use tracing::warn;

use crate::terrain::{World, UNCLASSIFIED};

/// Errors that can occur during biome map export.
#[derive(Error, Debug)]
pub enum BiomeMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("World has no cells to export")]
    EmptyWorld,
}

/// A biome color that is not `#rrggbb`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Color '{0}' is not in #rrggbb form")]
pub struct ColorParseError(pub String);

/// Options for biome map export.
#[derive(Debug, Clone)]
pub struct BiomeMapOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
    /// RGBA color for unclassified cells and biomes with unusable colors.
    pub unclassified_color: [u8; 4],
}

impl Default for BiomeMapOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
            unclassified_color: [0, 0, 0, 0],
        }
    }
}

/// Parses `#rrggbb` (case-insensitive) into RGB bytes.
pub fn parse_hex_color(hex: &str) -> Result<[u8; 3], ColorParseError> {
    let malformed = || ColorParseError(hex.to_string());

    let digits = hex.strip_prefix('#').ok_or_else(malformed)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| malformed());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Renders one pixel per cell.
///
/// Colors are parsed once per biome. Unparsable colors are logged and drawn
/// with `options.unclassified_color`, like unclassified cells.
pub fn world_to_image(world: &World, options: &BiomeMapOptions) -> RgbaImage {
    let palette: Vec<[u8; 4]> = world
        .biomes()
        .iter()
        .map(|biome| match parse_hex_color(&biome.color) {
            Ok([r, g, b]) => [r, g, b, 255],
            Err(err) => {
                warn!(biome = biome.label(), %err, "biome color unusable, drawing as unclassified");
                options.unclassified_color
            }
        })
        .collect();

    let mut img = RgbaImage::new(world.width(), world.height());
    for (pixel, &id) in img.pixels_mut().zip(world.biome_ids()) {
        let color = if id == UNCLASSIFIED {
            options.unclassified_color
        } else {
            palette
                .get(id as usize - 1)
                .copied()
                .unwrap_or(options.unclassified_color)
        };
        *pixel = Rgba(color);
    }

    img
}

/// Writes the world as an RGBA PNG.
pub fn export_world_png(
    world: &World,
    path: &Path,
    options: &BiomeMapOptions,
) -> Result<(), BiomeMapError> {
    if world.is_empty() {
        return Err(BiomeMapError::EmptyWorld);
    }

    let img = world_to_image(world, options);

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        world.width(),
        world.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}
