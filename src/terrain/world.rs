//! The generated biome grid.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeData;

/// Biome id stored for cells whose height matched no biome range.
pub const UNCLASSIFIED: u16 = 0;

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Errors raised when assembling a [`World`] from raw parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Grid {width}x{height} needs {expected} cells, got {actual}")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Grid extent {width}x{height} does not fit in memory")]
    ExtentTooLarge { width: u32, height: u32 },
}

/// A generated map: one biome id per cell, row-major.
///
/// Ids index into the world's own copy of the biome descriptors (`id - 1`),
/// with [`UNCLASSIFIED`] reserved for cells outside every range. The world
/// is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorldRepr")]
pub struct World {
    width: u32,
    height: u32,
    /// Seed the lattice table was generated from, `None` for caller tables.
    seed: Option<u64>,
    biomes: Vec<BiomeData>,
    biome_ids: Vec<u16>,
}

/// Unchecked serialized form of [`World`].
#[derive(Deserialize)]
struct WorldRepr {
    width: u32,
    height: u32,
    seed: Option<u64>,
    biomes: Vec<BiomeData>,
    biome_ids: Vec<u16>,
}

impl TryFrom<WorldRepr> for World {
    type Error = WorldError;

    fn try_from(repr: WorldRepr) -> Result<Self, Self::Error> {
        World::new(repr.width, repr.height, repr.seed, repr.biomes, repr.biome_ids)
    }
}

impl World {
    /// Builds a world, checking that `biome_ids` holds exactly
    /// `width * height` cells.
    ///
    /// Ids without a matching descriptor are kept and read back as `None`.
    pub fn new(
        width: u32,
        height: u32,
        seed: Option<u64>,
        biomes: Vec<BiomeData>,
        biome_ids: Vec<u16>,
    ) -> Result<Self, WorldError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(WorldError::ExtentTooLarge { width, height })?;
        if biome_ids.len() != expected {
            return Err(WorldError::GridSizeMismatch {
                width,
                height,
                expected,
                actual: biome_ids.len(),
            });
        }
        Ok(Self::from_parts(width, height, seed, biomes, biome_ids))
    }

    /// Assembles a world from a finished id grid.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        seed: Option<u64>,
        biomes: Vec<BiomeData>,
        biome_ids: Vec<u16>,
    ) -> Self {
        debug_assert_eq!(biome_ids.len(), width as usize * height as usize);
        Self {
            width,
            height,
            seed,
            biomes,
            biome_ids,
        }
    }

    /// A 0x0 world.
    pub fn empty(seed: Option<u64>, biomes: Vec<BiomeData>) -> Self {
        Self::from_parts(0, 0, seed, biomes, Vec::new())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Seed actually used for generation.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.biome_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biome_ids.is_empty()
    }

    /// Biome descriptors referenced by the id grid.
    pub fn biomes(&self) -> &[BiomeData] {
        &self.biomes
    }

    /// Raw row-major id grid.
    pub fn biome_ids(&self) -> &[u16] {
        &self.biome_ids
    }

    /// Returns true if `point` lies inside the grid.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.width as i64
            && point.y < self.height as i64
    }

    fn index(&self, point: Point) -> Option<usize> {
        if self.contains(point) {
            Some(point.y as usize * self.width as usize + point.x as usize)
        } else {
            None
        }
    }

    /// Resolves a biome id; [`UNCLASSIFIED`] and unknown ids give `None`.
    pub fn biome(&self, id: u16) -> Option<&BiomeData> {
        if id == UNCLASSIFIED {
            return None;
        }
        self.biomes.get(id as usize - 1)
    }

    /// Biome id at `point`, or `None` when the point is outside the grid.
    pub fn biome_id_at(&self, point: Point) -> Option<u16> {
        self.index(point).map(|i| self.biome_ids[i])
    }

    /// Biome at `point`.
    ///
    /// Returns `None` for unclassified cells and for points outside the grid;
    /// use [`World::biome_id_at`] to tell them apart.
    pub fn get_at(&self, point: Point) -> Option<&BiomeData> {
        self.biome_id_at(point).and_then(|id| self.biome(id))
    }

    /// Iterates `(point, biome)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Option<&BiomeData>)> + '_ {
        let width = self.width as usize;
        self.biome_ids.iter().enumerate().map(move |(i, &id)| {
            let point = Point::new((i % width) as i64, (i / width) as i64);
            (point, self.biome(id))
        })
    }

    /// Visits every cell in row-major order until `f` breaks.
    pub fn each<F>(&self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Point, Option<&BiomeData>) -> ControlFlow<()>,
    {
        for (point, biome) in self.iter() {
            f(point, biome)?;
        }
        ControlFlow::Continue(())
    }

    /// Number of cells that matched no biome range.
    pub fn unclassified_count(&self) -> usize {
        self.biome_ids.iter().filter(|&&id| id == UNCLASSIFIED).count()
    }

    /// Cell count per id; index 0 counts unclassified cells.
    pub fn biome_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.biomes.len() + 1];
        for &id in &self.biome_ids {
            if let Some(count) = counts.get_mut(id as usize) {
                *count += 1;
            }
        }
        counts
    }
}
