//! Permutation table of lattice weights shared by every noise sample.

use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Table length used when the caller does not ask for a specific one.
pub const DEFAULT_TABLE_LEN: usize = 256;

/// Errors raised while building noise inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    #[error("Seed table length {0} is not a power of two")]
    InvalidTableSize(usize),
}

/// Returns an error unless `len` is a non-zero power of two.
pub fn validate_table_len(len: usize) -> Result<(), NoiseError> {
    if len.is_power_of_two() {
        Ok(())
    } else {
        Err(NoiseError::InvalidTableSize(len))
    }
}

/// Immutable table of lattice weights.
///
/// Lookups wrap with `index & (len - 1)`, so the length is always a power of
/// two. Cloning is cheap: the weights live behind an `Arc` and are shared
/// read-only between worker threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedTable {
    values: Arc<[f64]>,
    mask: usize,
}

impl SeedTable {
    /// Wraps caller-supplied weights.
    ///
    /// Weights are expected in `[0, 1]`; the evaluator does not rescale them.
    pub fn new(values: Vec<f64>) -> Result<Self, NoiseError> {
        validate_table_len(values.len())?;
        let mask = values.len() - 1;
        Ok(Self {
            values: values.into(),
            mask,
        })
    }

    /// Generates `len` weights in `[0, 1)` from `seed`.
    pub fn from_seed(seed: u64, len: usize) -> Result<Self, NoiseError> {
        validate_table_len(len)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values: Vec<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();
        Self::new(values)
    }

    /// Builds a table from raw 63-bit integers, mapping each magnitude onto
    /// `[0, 1]`.
    pub fn from_integers(values: &[i64]) -> Result<Self, NoiseError> {
        let scale = i64::MAX as f64;
        let weights = values
            .iter()
            .map(|v| (v.unsigned_abs() as f64 / scale).min(1.0))
            .collect();
        Self::new(weights)
    }

    /// Number of weights in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Tables are never empty; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bit mask applied to every lookup offset.
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Looks up a weight, wrapping negative and out-of-range offsets.
    #[inline]
    pub fn at(&self, offset: i64) -> f64 {
        // Two's-complement masking maps negative offsets into range.
        self.values[(offset as usize) & self.mask]
    }

    /// Raw weights in table order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_power_of_two_lengths() {
        assert_eq!(
            SeedTable::new(vec![0.5; 100]),
            Err(NoiseError::InvalidTableSize(100))
        );
        assert_eq!(SeedTable::new(Vec::new()), Err(NoiseError::InvalidTableSize(0)));
        assert!(SeedTable::from_seed(7, 300).is_err());
    }

    #[test]
    fn test_accepts_power_of_two_lengths() {
        for len in [1, 2, 16, 256, 4096] {
            let table = SeedTable::new(vec![0.0; len]).unwrap();
            assert_eq!(table.len(), len);
            assert_eq!(table.mask(), len - 1);
        }
    }

    #[test]
    fn test_seeded_tables_are_reproducible() {
        let a = SeedTable::from_seed(1234, DEFAULT_TABLE_LEN).unwrap();
        let b = SeedTable::from_seed(1234, DEFAULT_TABLE_LEN).unwrap();
        let c = SeedTable::from_seed(1235, DEFAULT_TABLE_LEN).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.values().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_lookups_wrap_around_the_table() {
        let table = SeedTable::new(vec![0.0, 0.25, 0.5, 0.75]).unwrap();
        assert_eq!(table.at(1), 0.25);
        assert_eq!(table.at(5), 0.25);
        assert_eq!(table.at(-1), 0.75);
        assert_eq!(table.at(-4), 0.0);
    }

    #[test]
    fn test_integer_tables_map_into_unit_range() {
        let table = SeedTable::from_integers(&[0, i64::MAX, i64::MAX / 2, i64::MIN]).unwrap();
        let values = table.values();
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 1.0);
        assert!((values[2] - 0.5).abs() < 1e-9);
        assert_eq!(values[3], 1.0);
    }
}
