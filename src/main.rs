//! Planetgen CLI - procedural planet elevation and hydrology generator.
//!
//! Runs the full generation pipeline (tectonics, erosion, hydrology) at a
//! chosen resolution and exports the elevation and water-mask grids as PNG.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use planetgen::export::{export_elevation_png, export_water_mask_png, PngExportOptions};
use planetgen::{
    ElevationField, ErosionConfig, FaultType, HydrologyConfig, Pipeline, TectonicConfig,
};

/// Procedural planet elevation and hydrology generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a planet and export its heightmap and water mask.
    Generate {
        /// Grid resolution (width and height).
        #[arg(short, long, default_value = "512")]
        resolution: usize,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,

        // Tectonic options
        /// Number of tectonic plates (4-50 typical).
        #[arg(long, default_value = "12")]
        plates: usize,

        /// Boundary lowering strength on continental plates (0-1).
        #[arg(long, default_value = "0.3")]
        jitter: f32,

        /// Oceanic plate baseline elevation (0-1).
        #[arg(long, default_value = "0.1")]
        ocean_floor: f32,

        /// Continental uplift scale (0-1).
        #[arg(long, default_value = "0.7")]
        plate_delta: f32,

        /// Fault mode along plate boundaries.
        #[arg(long, default_value = "mixed")]
        fault: FaultMode,

        /// Random variation of plate sizes (0-1).
        #[arg(long, default_value = "0.4")]
        plate_size_variance: f32,

        /// Keep plate boundaries perfectly north-south (disable skew).
        #[arg(long)]
        symmetric_tiling: bool,

        // Erosion options
        /// Skip the erosion stage.
        #[arg(long)]
        skip_erosion: bool,

        /// Number of erosion droplets.
        #[arg(long, default_value = "50000")]
        droplets: u32,

        /// Droplet direction inertia (0-1).
        #[arg(long, default_value = "0.05")]
        inertia: f32,

        /// Droplet evaporation per step (0-1).
        #[arg(long, default_value = "0.02")]
        evaporation: f32,

        // Hydrology options
        /// Sea level in the normalized height domain.
        #[arg(long, default_value = "0.4")]
        sea_level: f32,

        /// Channel carving depth.
        #[arg(long, default_value = "0.02")]
        river_depth: f32,

        /// Minimum fill depth for lake masking.
        #[arg(long, default_value = "0.005")]
        lake_threshold: f32,
    },
}

/// CLI-facing fault mode names.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FaultMode {
    Ridge,
    Trench,
    Shear,
    Mixed,
}

impl From<FaultMode> for FaultType {
    fn from(mode: FaultMode) -> Self {
        match mode {
            FaultMode::Ridge => FaultType::Ridge,
            FaultMode::Trench => FaultType::Trench,
            FaultMode::Shear => FaultType::Shear,
            FaultMode::Mixed => FaultType::Mixed,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            resolution,
            seed,
            output,
            name,
            plates,
            jitter,
            ocean_floor,
            plate_delta,
            fault,
            plate_size_variance,
            symmetric_tiling,
            skip_erosion,
            droplets,
            inertia,
            evaporation,
            sea_level,
            river_depth,
            lake_threshold,
        } => {
            if resolution < 16 || resolution > 8192 {
                eprintln!("Error: Resolution must be between 16 and 8192");
                std::process::exit(1);
            }

            let seed = seed.unwrap_or_else(|| {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_nanos() as u64
            });

            println!("Planetgen - Procedural Planet Generator");
            println!("=======================================");
            println!("Resolution: {}x{}", resolution, resolution);
            println!("Seed: {}", seed);
            println!("Output: {}", output.display());

            let start = Instant::now();

            let tectonics = TectonicConfig {
                plate_count: plates,
                jitter,
                ocean_floor,
                plate_delta,
                fault_type: fault.into(),
                plate_size_variance,
                desymmetrize_tiling: !symmetric_tiling,
                seed,
                ..Default::default()
            };

            let erosion = ErosionConfig {
                iterations: if skip_erosion { 0 } else { droplets },
                inertia,
                evaporation,
                seed,
                ..Default::default()
            };

            let hydrology = HydrologyConfig {
                sea_level,
                river_depth,
                lake_threshold,
            };

            let pipeline = Pipeline::standard(tectonics, erosion, hydrology);
            let mut field = ElevationField::new(resolution);

            println!("\nRunning generation pipeline...");
            pipeline
                .run_with_callbacks(
                    &mut field,
                    |name, i, total| {
                        println!("  [{}/{}] Starting: {}", i + 1, total, name);
                    },
                    |name, i, total| {
                        println!("  [{}/{}] Completed: {}", i + 1, total, name);
                    },
                )
                .unwrap_or_else(|e| {
                    eprintln!("Error during generation: {}", e);
                    std::process::exit(1);
                });

            println!("Generation completed in {:.2?}", start.elapsed());

            let (min, max) = field.height_range();
            let wet = field.water_mask.iter().filter(|&&m| m > 0.0).count();
            println!("Height range: [{:.3}, {:.3}]", min, max);
            println!(
                "Water coverage: {:.1}% of cells",
                100.0 * wet as f32 / field.cell_count() as f32
            );

            if let Err(e) = std::fs::create_dir_all(&output) {
                eprintln!("Error creating output directory: {}", e);
                std::process::exit(1);
            }

            let elev_path = output.join(format!("{}_height.png", name));
            let water_path = output.join(format!("{}_water.png", name));

            let options = PngExportOptions::auto_range(&field);
            if let Err(e) = export_elevation_png(&field, &elev_path, &options) {
                eprintln!("Error exporting heightmap: {}", e);
                std::process::exit(1);
            }
            if let Err(e) = export_water_mask_png(&field, &water_path) {
                eprintln!("Error exporting water mask: {}", e);
                std::process::exit(1);
            }

            println!("Wrote {}", elev_path.display());
            println!("Wrote {}", water_path.display());
        }
    }
}
