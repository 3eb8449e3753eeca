//! Biome classification by height.
//!
//! A [`BiomeTable`] holds ordered half-open height ranges. Each shaped cell
//! height resolves to the first range containing it, or to the unclassified
//! sentinel when none does.

mod standard;
mod table;

pub use table::{BiomeRange, BiomeTable, MAX_BIOMES};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a biome table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BiomeError {
    #[error("Invalid biome range [{lower}, {upper}): bounds must satisfy 0 <= lower < upper <= 1")]
    InvalidRange { lower: f64, upper: f64 },
    #[error("Biome table is full ({0} ranges)")]
    TooManyBiomes(usize),
}

/// Descriptor attached to a biome range.
///
/// `color` is passed through untouched; the PNG exporter expects `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiomeData {
    /// Biome group name, e.g. "Liquid" or "Mounts".
    pub name: String,
    /// Human readable label for this particular band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub color: String,
}

impl BiomeData {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            color: color.into(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Display name if set, otherwise the group name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
