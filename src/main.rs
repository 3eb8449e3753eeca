//! tilemapgen CLI - procedural tile map generator.
//!
//! Generates a biome map from lattice noise and writes it as a PNG.

use clap::{Parser, Subcommand};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use tilemapgen::biomes::BiomeTable;
use tilemapgen::export::{export_world_png, BiomeMapOptions};
use tilemapgen::generator::{generate, GenerateParams, SeedSpec};
use tilemapgen::terrain::{
    GenerationConfig, Point, DEFAULT_BORDER_SMOOTHNESS, DEFAULT_FALLOFF,
    DEFAULT_FREQUENCY_CHANGE, DEFAULT_HEIGHT_REDISTRIBUTION,
};

/// Procedural tile map generator.
#[derive(Parser)]
#[command(name = "tilemapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a biome map and export it as PNG.
    Generate {
        /// Map width in cells.
        #[arg(long, default_value = "1000")]
        width: u32,

        /// Map height in cells.
        #[arg(long, default_value = "1000")]
        height: u32,

        /// Lattice frequency control (0-1, higher gives busier terrain).
        #[arg(long, default_value_t = DEFAULT_FREQUENCY_CHANGE)]
        frequency_change: f64,

        /// Border smoothness (0-1, higher gives fewer octaves).
        #[arg(long, default_value_t = DEFAULT_BORDER_SMOOTHNESS)]
        border_smoothness: f64,

        /// Redistribution exponent (0.5-1.5, higher lowers the terrain).
        #[arg(long, default_value_t = DEFAULT_HEIGHT_REDISTRIBUTION)]
        height_redistribution: f64,

        /// Edge falloff strength (0-0.9, 0 disables).
        #[arg(long, default_value_t = DEFAULT_FALLOFF)]
        falloff: f64,

        /// Skip the height averaging curve.
        #[arg(long)]
        no_height_averaging: bool,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// File of whitespace- or comma-separated integers used as the seed
        /// table (count must be a power of two).
        #[arg(long, conflicts_with = "seed")]
        seed_table: Option<PathBuf>,

        /// Seed table length (power of two).
        #[arg(long, default_value = "512")]
        seed_size: usize,

        /// Horizontal noise offset.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset_x: i64,

        /// Vertical noise offset.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset_y: i64,

        /// Output PNG path.
        #[arg(short, long, default_value = "world.png")]
        output: PathBuf,
    },

    /// Print the standard biome table.
    Biomes,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            width,
            height,
            frequency_change,
            border_smoothness,
            height_redistribution,
            falloff,
            no_height_averaging,
            seed,
            seed_table,
            seed_size,
            offset_x,
            offset_y,
            output,
        } => {
            let config = GenerationConfig {
                width,
                height,
                frequency_change,
                border_smoothness,
                height_redistribution,
                falloff,
                height_averaging: Some(!no_height_averaging),
            };
            let seed = match seed_table {
                Some(path) => Some(SeedSpec::Integers(load_seed_table(&path))),
                None => seed.map(SeedSpec::Value),
            };
            let params = GenerateParams {
                seed,
                table_len: seed_size,
                offset: Point::new(offset_x, offset_y),
            };
            run_generate(&config, &params, output);
        }
        Commands::Biomes => print_biomes(),
    }
}

fn load_seed_table(path: &Path) -> Vec<i64> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading seed table {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    match parse_seed_integers(&text) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error parsing seed table {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn parse_seed_integers(text: &str) -> Result<Vec<i64>, ParseIntError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse::<i64>)
        .collect()
}

fn run_generate(config: &GenerationConfig, params: &GenerateParams, output: PathBuf) {
    let normalized = config.normalize();

    println!("tilemapgen - Procedural Tile Map Generator");
    println!("==========================================");
    println!("Size: {}x{}", config.width, config.height);
    println!(
        "Octaves: {}, lattice frequency: {}",
        normalized.octave_count, normalized.lattice_frequency
    );
    println!("Output: {}", output.display());
    println!();

    let biomes = BiomeTable::standard();

    let start = Instant::now();
    let world = match generate(config, &biomes, params) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        }
    };
    println!("Generated in {:.2?}", start.elapsed());
    if let Some(seed) = world.seed() {
        println!("Seed: {}", seed);
    }

    let histogram = world.biome_histogram();
    let total = world.len().max(1) as f64;
    for (count, biome) in histogram.iter().skip(1).zip(world.biomes()) {
        if *count > 0 {
            println!(
                "  {:<14} {:>6.2}%",
                biome.label(),
                *count as f64 * 100.0 / total
            );
        }
    }
    if world.unclassified_count() > 0 {
        println!("  {:<14} {:>6}", "unclassified", world.unclassified_count());
    }

    let start = Instant::now();
    if let Err(e) = export_world_png(&world, &output, &BiomeMapOptions::default()) {
        eprintln!("Error exporting biome map: {}", e);
        std::process::exit(1);
    }
    println!("Exported {} in {:.2?}", output.display(), start.elapsed());
}

fn print_biomes() {
    let table = BiomeTable::standard();
    println!("{:<8} {:<14} {:>6} {:>6}  {}", "group", "label", "lower", "upper", "color");
    for range in table.ranges() {
        let data = range.data();
        println!(
            "{:<8} {:<14} {:>6.3} {:>6.3}  {}",
            data.name,
            data.label(),
            range.lower(),
            range.upper(),
            data.color
        );
    }
    for (lower, upper) in table.gaps() {
        println!("unclassified gap [{:.3}, {:.3})", lower, upper);
    }
}
