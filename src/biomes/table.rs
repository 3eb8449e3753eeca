//! Ordered height ranges and first-match classification.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{BiomeData, BiomeError};
use crate::terrain::UNCLASSIFIED;

/// Largest number of ranges a table can hold; ids are `u16` with 0 reserved.
pub const MAX_BIOMES: usize = u16::MAX as usize;

/// A half-open height interval `[lower, upper)` mapped to a biome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeRange {
    lower: f64,
    upper: f64,
    data: BiomeData,
}

impl BiomeRange {
    /// Creates a range, clamping the bounds into `[0, 1]`.
    ///
    /// Fails if either bound is NaN or the clamped range is empty.
    pub fn new(lower: f64, upper: f64, data: BiomeData) -> Result<Self, BiomeError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(BiomeError::InvalidRange { lower, upper });
        }
        let lower = lower.max(0.0);
        let upper = upper.min(1.0);
        if lower >= upper {
            return Err(BiomeError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper, data })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn data(&self) -> &BiomeData {
        &self.data
    }

    /// Half-open containment: `lower <= height < upper`.
    #[inline]
    pub fn contains(&self, height: f64) -> bool {
        height >= self.lower && height < self.upper
    }
}

/// Ordered set of biome ranges.
///
/// Ranges may overlap; the first one containing a height wins. Callers
/// wanting full coverage should partition `[0, 1)` without gaps, see
/// [`BiomeTable::gaps`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomeTable {
    ranges: Vec<BiomeRange>,
}

impl BiomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(lower, upper, data)` triples, in order.
    pub fn from_ranges<I>(ranges: I) -> Result<Self, BiomeError>
    where
        I: IntoIterator<Item = (f64, f64, BiomeData)>,
    {
        let mut table = Self::new();
        for (lower, upper, data) in ranges {
            table.push(lower, upper, data)?;
        }
        Ok(table)
    }

    /// Appends a range after all existing ones.
    pub fn push(&mut self, lower: f64, upper: f64, data: BiomeData) -> Result<&BiomeRange, BiomeError> {
        if self.ranges.len() >= MAX_BIOMES {
            return Err(BiomeError::TooManyBiomes(MAX_BIOMES));
        }
        let range = BiomeRange::new(lower, upper, data)?;
        self.ranges.push(range);
        Ok(&self.ranges[self.ranges.len() - 1])
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[BiomeRange] {
        &self.ranges
    }

    /// Finds the first range containing `height`.
    ///
    /// NaN and heights outside every range are unclassified (`None`).
    pub fn classify(&self, height: f64) -> Option<&BiomeRange> {
        self.find(height).map(|(_, range)| range)
    }

    /// Like [`BiomeTable::classify`], returning the 1-based id stored in a
    /// [`World`](crate::terrain::World), or [`UNCLASSIFIED`].
    pub fn classify_id(&self, height: f64) -> u16 {
        self.find(height)
            .map_or(UNCLASSIFIED, |(i, _)| (i + 1) as u16)
    }

    fn find(&self, height: f64) -> Option<(usize, &BiomeRange)> {
        let found = self
            .ranges
            .iter()
            .enumerate()
            .find(|(_, range)| range.contains(height));
        if let Some((_, range)) = found {
            trace!(
                height,
                lower = range.lower,
                upper = range.upper,
                biome = %range.data.name,
                "selected biome"
            );
        }
        found
    }

    /// Copies the descriptors in table order.
    pub fn descriptors(&self) -> Vec<BiomeData> {
        self.ranges.iter().map(|r| r.data.clone()).collect()
    }

    /// Sub-intervals of `[0, 1)` not covered by any range, in ascending order.
    pub fn gaps(&self) -> Vec<(f64, f64)> {
        let mut spans: Vec<(f64, f64)> = self.ranges.iter().map(|r| (r.lower, r.upper)).collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut gaps = Vec::new();
        let mut cursor = 0.0;
        for (lower, upper) in spans {
            if lower > cursor {
                gaps.push((cursor, lower));
            }
            cursor = f64::max(cursor, upper);
        }
        if cursor < 1.0 {
            gaps.push((cursor, 1.0));
        }
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_halves() -> BiomeTable {
        BiomeTable::from_ranges([
            (0.0, 0.5, BiomeData::new("A", "#000001")),
            (0.5, 1.0, BiomeData::new("B", "#000002")),
        ])
        .unwrap()
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let table = two_halves();
        assert_eq!(table.classify(0.5).unwrap().data().name, "B");
        assert_eq!(table.classify(0.49999).unwrap().data().name, "A");
        assert_eq!(table.classify(0.0).unwrap().data().name, "A");
        assert!(table.classify(1.0).is_none());
    }

    #[test]
    fn test_ids_follow_table_order() {
        let table = two_halves();
        assert_eq!(table.classify_id(0.25), 1);
        assert_eq!(table.classify_id(0.75), 2);
        assert_eq!(table.classify_id(1.0), UNCLASSIFIED);
    }

    #[test]
    fn test_heights_outside_ranges_are_unclassified() {
        let table =
            BiomeTable::from_ranges([(0.2, 0.8, BiomeData::new("Middle", "#808080"))]).unwrap();
        assert!(table.classify(0.1).is_none());
        assert_eq!(table.classify_id(0.1), UNCLASSIFIED);
        assert!(table.classify(-0.01).is_none());
        assert!(table.classify(f64::NAN).is_none());
        assert_eq!(table.classify_id(f64::NAN), UNCLASSIFIED);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let table = BiomeTable::from_ranges([
            (0.0, 0.6, BiomeData::new("First", "#111111")),
            (0.4, 1.0, BiomeData::new("Second", "#222222")),
        ])
        .unwrap();
        assert_eq!(table.classify(0.5).unwrap().data().name, "First");
        assert_eq!(table.classify(0.7).unwrap().data().name, "Second");
    }

    #[test]
    fn test_bounds_are_clamped_to_unit_interval() {
        let range = BiomeRange::new(-0.3, 1.7, BiomeData::new("All", "#ffffff")).unwrap();
        assert_eq!(range.lower(), 0.0);
        assert_eq!(range.upper(), 1.0);
    }

    #[test]
    fn test_empty_ranges_are_rejected() {
        let data = BiomeData::new("Nope", "#000000");
        assert!(matches!(
            BiomeRange::new(0.5, 0.5, data.clone()),
            Err(BiomeError::InvalidRange { .. })
        ));
        assert!(BiomeRange::new(0.7, 0.2, data.clone()).is_err());
        assert!(BiomeRange::new(f64::NAN, 0.2, data.clone()).is_err());
        assert!(BiomeRange::new(1.2, 1.5, data).is_err());
    }

    #[test]
    fn test_classification_returns_shared_views() {
        let table = two_halves();
        let first = table.classify(0.1).unwrap().data().clone();
        let mut snapshot = table.descriptors();
        snapshot[0].name.push_str("-edited");
        // Editing a copy never reaches the table.
        assert_eq!(table.classify(0.1).unwrap().data(), &first);
    }

    #[test]
    fn test_gaps_report_uncovered_spans() {
        assert!(two_halves().gaps().is_empty());

        let table = BiomeTable::from_ranges([
            (0.2, 0.4, BiomeData::new("A", "#000000")),
            (0.5, 0.9, BiomeData::new("B", "#000000")),
        ])
        .unwrap();
        assert_eq!(table.gaps(), vec![(0.0, 0.2), (0.4, 0.5), (0.9, 1.0)]);
        assert_eq!(BiomeTable::new().gaps(), vec![(0.0, 1.0)]);
    }

    #[test]
    fn test_clear_empties_the_table() {
        let mut table = two_halves();
        assert_eq!(table.len(), 2);
        table.clear();
        assert!(table.is_empty());
        assert!(table.classify(0.3).is_none());
    }

    #[test]
    fn test_table_holds_one_range_per_id() {
        let mut table = BiomeTable::new();
        let low = BiomeData::new("Low", "#808080");
        for _ in 0..MAX_BIOMES - 1 {
            table.push(0.0, 0.5, low.clone()).unwrap();
        }
        table.push(0.5, 1.0, BiomeData::new("Top", "#ffffff")).unwrap();
        assert_eq!(table.len(), MAX_BIOMES);

        // The last range gets the largest id, distinct from the sentinel.
        assert_eq!(table.classify_id(0.75), u16::MAX);
        assert_eq!(table.classify_id(0.25), 1);

        let err = table.push(0.0, 1.0, low).unwrap_err();
        assert_eq!(err, BiomeError::TooManyBiomes(MAX_BIOMES));
    }
}
