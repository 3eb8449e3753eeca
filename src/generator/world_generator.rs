//! Grid assembly: noise, shaping and classification for every cell.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, instrument};

use super::params::GenerateParams;
use crate::biomes::{BiomeData, BiomeError, BiomeRange, BiomeTable};
use crate::noise::{LatticeNoise, NoiseError, NoiseField};
use crate::terrain::{shape_height, GenerationConfig, Point, World, UNCLASSIFIED};

/// Errors that stop a generation run before any cell is evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Invalid seed table: {0}")]
    Noise(#[from] NoiseError),
    #[error("Grid extent {width}x{height} does not fit in memory")]
    ExtentTooLarge { width: u32, height: u32 },
}

/// Generates a world with the built-in lattice noise backend.
///
/// The seed table is resolved and validated once, before the grid loop.
#[instrument(skip_all, fields(width = config.width, height = config.height))]
pub fn generate(
    config: &GenerationConfig,
    biomes: &BiomeTable,
    params: &GenerateParams,
) -> Result<World, GenerateError> {
    let (seed, table) = params.resolve()?;
    let noise = LatticeNoise::from_config(table, &config.normalize());
    generate_with_field(config, biomes, &noise, seed, params.offset)
}

/// Generates a world sampling heights from any [`NoiseField`].
///
/// Rows are evaluated in parallel; each worker owns a disjoint row of the
/// output, so the result does not depend on thread count.
pub fn generate_with_field<N>(
    config: &GenerationConfig,
    biomes: &BiomeTable,
    field: &N,
    seed: Option<u64>,
    offset: Point,
) -> Result<World, GenerateError>
where
    N: NoiseField + ?Sized,
{
    let width = config.width;
    let height = config.height;
    let descriptors = biomes.descriptors();

    if width == 0 || height == 0 {
        debug!("zero extent, returning empty world");
        return Ok(World::empty(seed, descriptors));
    }

    let row_len = width as usize;
    let cells = row_len
        .checked_mul(height as usize)
        .ok_or(GenerateError::ExtentTooLarge { width, height })?;

    let normalized = config.normalize();
    debug!(
        noise = field.name(),
        octaves = normalized.octave_count,
        lattice_frequency = normalized.lattice_frequency,
        exponent = normalized.redistribution_exponent,
        falloff = normalized.falloff_strength,
        averaging = normalized.height_averaging,
        biomes = biomes.len(),
        "generating world"
    );

    let mut biome_ids = vec![UNCLASSIFIED; cells];
    biome_ids
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let ly = offset.y.wrapping_add(y as i64);
            for (x, id) in row.iter_mut().enumerate() {
                let x = x as u32;
                let lx = offset.x.wrapping_add(x as i64);
                let raw = field.evaluate(lx, ly, width, height);
                let shaped = shape_height(raw, &normalized, x, y, width, height);
                *id = biomes.classify_id(shaped);
            }
        });

    let world = World::from_parts(width, height, seed, descriptors, biome_ids);
    debug!(
        cells,
        unclassified = world.unclassified_count(),
        "world generated"
    );
    Ok(world)
}

/// A generation config paired with the biome table it classifies into.
#[derive(Debug, Clone, Default)]
pub struct WorldGenerator {
    config: GenerationConfig,
    biomes: BiomeTable,
}

impl WorldGenerator {
    pub fn new(config: GenerationConfig, biomes: BiomeTable) -> Self {
        Self { config, biomes }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GenerationConfig {
        &mut self.config
    }

    pub fn biomes(&self) -> &BiomeTable {
        &self.biomes
    }

    /// Appends a biome range after the existing ones.
    pub fn add_biome(
        &mut self,
        lower: f64,
        upper: f64,
        data: BiomeData,
    ) -> Result<&BiomeRange, BiomeError> {
        self.biomes.push(lower, upper, data)
    }

    pub fn clear_biomes(&mut self) {
        self.biomes.clear();
    }

    pub fn generate(&self, params: &GenerateParams) -> Result<World, GenerateError> {
        generate(&self.config, &self.biomes, params)
    }

    pub fn generate_with_field<N>(
        &self,
        field: &N,
        seed: Option<u64>,
        offset: Point,
    ) -> Result<World, GenerateError>
    where
        N: NoiseField + ?Sized,
    {
        generate_with_field(&self.config, &self.biomes, field, seed, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::SeedTable;
    use crate::terrain::{NormalizedConfig, UNCLASSIFIED};

    fn flat_config(width: u32, height: u32) -> GenerationConfig {
        GenerationConfig {
            width,
            height,
            frequency_change: 0.0,
            border_smoothness: 1.0,
            height_redistribution: 1.0,
            falloff: 0.0,
            height_averaging: Some(false),
        }
    }

    fn single_biome() -> BiomeTable {
        BiomeTable::from_ranges([(0.0, 1.0, BiomeData::new("A", "#00ff00"))]).unwrap()
    }

    /// Constant field for exercising the pipeline without lattice noise.
    struct ConstantField(f64);

    impl NoiseField for ConstantField {
        fn evaluate(&self, _x: i64, _y: i64, _width: u32, _height: u32) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_zero_table_classifies_every_cell() {
        let table = SeedTable::new(vec![0.0; 256]).unwrap();
        let world = generate(
            &flat_config(4, 4),
            &single_biome(),
            &GenerateParams::with_table(table),
        )
        .unwrap();

        assert_eq!(world.len(), 16);
        assert_eq!(world.seed(), None);
        for (_, biome) in world.iter() {
            assert_eq!(biome.unwrap().name, "A");
        }
    }

    #[test]
    fn test_same_inputs_produce_identical_worlds() {
        let config = GenerationConfig {
            width: 48,
            height: 32,
            falloff: 0.3,
            ..Default::default()
        };
        let biomes = BiomeTable::standard();
        let params = GenerateParams::with_seed(2024).offset(Point::new(5, -3));

        let a = generate(&config, &biomes, &params).unwrap();
        let b = generate(&config, &biomes, &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(2024));
    }

    #[test]
    fn test_parallel_rows_match_sequential_reference() {
        let config = GenerationConfig {
            width: 37,
            height: 23,
            frequency_change: 0.6,
            border_smoothness: 0.2,
            height_redistribution: 1.2,
            falloff: 0.4,
            height_averaging: Some(true),
        };
        let biomes = BiomeTable::standard();
        let table = SeedTable::from_seed(77, 512).unwrap();
        let world = generate(&config, &biomes, &GenerateParams::with_table(table.clone())).unwrap();

        let normalized: NormalizedConfig = config.normalize();
        let noise = LatticeNoise::from_config(table, &normalized);
        for y in 0..config.height {
            for x in 0..config.width {
                let raw = noise.evaluate(x as i64, y as i64, config.width, config.height);
                let shaped = shape_height(raw, &normalized, x, y, config.width, config.height);
                let expected = biomes.classify_id(shaped);
                assert_eq!(
                    world.biome_id_at(Point::new(x as i64, y as i64)),
                    Some(expected),
                    "mismatch at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_offset_shifts_noise_sampling() {
        let config = flat_config(16, 16);
        let config = GenerationConfig {
            frequency_change: 0.5,
            border_smoothness: 0.0,
            ..config
        };
        let biomes = BiomeTable::standard();
        let table = SeedTable::from_seed(3, 256).unwrap();

        let base = generate(&config, &biomes, &GenerateParams::with_table(table.clone())).unwrap();
        let shifted = generate(
            &config,
            &biomes,
            &GenerateParams::with_table(table).offset(Point::new(1, 0)),
        )
        .unwrap();

        for y in 0..16 {
            for x in 0..15 {
                assert_eq!(
                    shifted.biome_id_at(Point::new(x, y)),
                    base.biome_id_at(Point::new(x + 1, y))
                );
            }
        }
    }

    #[test]
    fn test_uncovered_heights_become_unclassified() {
        let biomes =
            BiomeTable::from_ranges([(0.2, 0.8, BiomeData::new("Middle", "#888888"))]).unwrap();
        let world =
            generate_with_field(&flat_config(5, 5), &biomes, &ConstantField(0.1), None, Point::ORIGIN)
                .unwrap();
        assert_eq!(world.unclassified_count(), 25);
        assert!(world.biome_ids().iter().all(|&id| id == UNCLASSIFIED));
    }

    #[test]
    fn test_zero_extent_returns_empty_world() {
        let world = generate(
            &flat_config(0, 10),
            &single_biome(),
            &GenerateParams::with_seed(9),
        )
        .unwrap();
        assert!(world.is_empty());
        assert_eq!(world.width(), 0);
        assert_eq!(world.height(), 0);
        assert_eq!(world.seed(), Some(9));
    }

    #[test]
    fn test_invalid_table_length_fails_before_generation() {
        let err = generate(
            &flat_config(4, 4),
            &single_biome(),
            &GenerateParams::with_seed(1).table_len(300),
        )
        .unwrap_err();
        assert_eq!(err, GenerateError::Noise(NoiseError::InvalidTableSize(300)));
    }

    #[test]
    fn test_generator_manages_its_biome_table() {
        let mut generator = WorldGenerator::new(flat_config(3, 3), BiomeTable::new());
        generator
            .add_biome(0.0, 0.5, BiomeData::new("Low", "#000080"))
            .unwrap();
        generator
            .add_biome(0.5, 1.0, BiomeData::new("High", "#ffffff"))
            .unwrap();
        assert_eq!(generator.biomes().len(), 2);

        let world = generator
            .generate_with_field(&ConstantField(0.75), Some(1), Point::ORIGIN)
            .unwrap();
        assert!(world.iter().all(|(_, b)| b.map(|b| b.name.as_str()) == Some("High")));

        generator.clear_biomes();
        let world = generator
            .generate_with_field(&ConstantField(0.75), Some(1), Point::ORIGIN)
            .unwrap();
        assert_eq!(world.unclassified_count(), 9);
    }

    #[test]
    fn test_world_keeps_its_own_descriptor_copy() {
        let mut generator = WorldGenerator::new(flat_config(2, 2), single_biome());
        let world = generator
            .generate_with_field(&ConstantField(0.5), None, Point::ORIGIN)
            .unwrap();
        generator.clear_biomes();
        generator
            .add_biome(0.0, 1.0, BiomeData::new("Replaced", "#123456"))
            .unwrap();
        assert_eq!(world.get_at(Point::ORIGIN).unwrap().name, "A");
    }
}
