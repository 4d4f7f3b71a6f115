#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for generating the map's `GeoJSON` artifacts.
//!
//! Reads the reading-room registry and heat-sample feeds, runs the gap
//! detector, and writes `FeatureCollection` files the frontend loads
//! directly.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reading_map_gaps_models::GapParams;
use reading_map_generate::{GenerateConfig, run_gaps, run_rooms};

#[derive(Parser)]
#[command(name = "reading_map_generate", about = "Map artifact generation tool")]
struct Cli {
    /// Path to the reading-room registry JSON.
    #[arg(long, default_value = "static/data/reading_rooms.json")]
    rooms: PathBuf,

    /// Path to the heat-sample JSON.
    #[arg(long, default_value = "static/data/heat_samples.json")]
    heat: PathBuf,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "data/generated")]
    out_dir: PathBuf,

    /// Service radius around each room, in meters.
    #[arg(long, default_value_t = reading_map_feed::SERVICE_RADIUS_METERS)]
    service_radius_meters: f64,

    /// Minimum heat weight (exclusive) for a sample to count.
    #[arg(long, default_value_t = 80.0)]
    weight_threshold: f64,

    /// Clustering neighborhood radius in coordinate degrees.
    #[arg(long, default_value_t = 0.003)]
    eps: f64,

    /// Minimum cluster size for a gap to be reported.
    #[arg(long, default_value_t = 5)]
    min_cluster_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect service gaps and write `gap_areas.geojson`
    Gaps,
    /// Write the room markers as `rooms.geojson`
    Rooms,
    /// Generate both artifacts
    All,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = GenerateConfig {
        rooms_path: cli.rooms,
        heat_path: cli.heat,
        out_dir: cli.out_dir,
        service_radius: cli.service_radius_meters * reading_map_feed::DEGREES_PER_METER,
        params: GapParams {
            weight_threshold: cli.weight_threshold,
            neighborhood_radius: cli.eps,
            min_cluster_size: cli.min_cluster_size,
        },
    };

    std::fs::create_dir_all(&config.out_dir)?;

    match cli.command {
        Commands::Gaps => run_gaps(&config)?,
        Commands::Rooms => run_rooms(&config)?,
        Commands::All => {
            run_gaps(&config)?;
            run_rooms(&config)?;
        }
    }

    Ok(())
}
