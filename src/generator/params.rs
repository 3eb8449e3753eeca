//! Per-run generation parameters and seed resolution.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::noise::{NoiseError, SeedTable, DEFAULT_TABLE_LEN};
use crate::terrain::Point;

/// Where the lattice weights come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSpec {
    /// Generate `table_len` weights from this seed.
    Value(u64),
    /// Use these weights as-is.
    Table(SeedTable),
    /// Raw integers mapped onto `[0, 1]` by magnitude. The length must be a
    /// power of two.
    Integers(Vec<i64>),
}

/// Parameters for one call to [`generate`](super::generate).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    /// `None` derives a seed from the system clock, so output is not
    /// reproducible. Pass a seed or table for deterministic maps.
    pub seed: Option<SeedSpec>,
    /// Length of generated tables; must be a power of two.
    pub table_len: usize,
    /// Added to every cell coordinate before sampling noise.
    pub offset: Point,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            seed: None,
            table_len: DEFAULT_TABLE_LEN,
            offset: Point::ORIGIN,
        }
    }
}

impl GenerateParams {
    /// Parameters generating the table from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(SeedSpec::Value(seed)),
            ..Default::default()
        }
    }

    /// Parameters using a caller-supplied table.
    pub fn with_table(table: SeedTable) -> Self {
        Self {
            seed: Some(SeedSpec::Table(table)),
            ..Default::default()
        }
    }

    pub fn table_len(mut self, table_len: usize) -> Self {
        self.table_len = table_len;
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    /// Resolves the seed and builds the lattice table.
    ///
    /// Returns the seed actually used (`None` for caller tables and integer
    /// lists).
    pub fn resolve(&self) -> Result<(Option<u64>, SeedTable), NoiseError> {
        match &self.seed {
            Some(SeedSpec::Table(table)) => Ok((None, table.clone())),
            Some(SeedSpec::Integers(values)) => Ok((None, SeedTable::from_integers(values)?)),
            Some(SeedSpec::Value(seed)) => {
                let table = SeedTable::from_seed(*seed, self.table_len)?;
                Ok((Some(*seed), table))
            }
            None => {
                let seed = clock_seed();
                info!(seed, "no seed supplied, using clock-derived seed");
                let table = SeedTable::from_seed(seed, self.table_len)?;
                Ok((Some(seed), table))
            }
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
