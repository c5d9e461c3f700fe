//! Drift CLI - Headless driver for the drift particle field

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, shapes::Shape, simulate};

#[derive(Parser)]
#[command(name = "drift")]
#[command(about = "Mesh-anchored interactive particle field, run headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the particle simulation for a number of frames and report on it
    Simulate {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Fixed frame delta in seconds; the frame period with --realtime
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Pace frames in real time and time them from the wall clock
        #[arg(long)]
        realtime: bool,

        /// Override the particle count
        #[arg(long)]
        particles: Option<usize>,

        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Built-in spawn shape, used when --points is not given
        #[arg(long, value_enum, default_value = "sphere")]
        shape: Shape,

        /// JSON file holding an array of [x, y, z] spawn points
        #[arg(long)]
        points: Option<String>,

        /// Uniform scale applied to spawn points before centering
        #[arg(long, default_value = "150.0")]
        model_scale: f32,

        /// Radius of the circular pointer path in the z=0 plane
        #[arg(long, default_value = "100.0")]
        orbit: f32,

        /// Click every N frames (0 = never)
        #[arg(long, default_value = "120")]
        click_every: u64,

        /// Write final positions and sizes to this JSON file
        #[arg(long)]
        output: Option<String>,
    },

    /// Print the default config, or check and print a config file
    Config {
        /// Config file to load and validate
        #[arg(long)]
        check: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            dt,
            realtime,
            particles,
            seed,
            shape,
            points,
            model_scale,
            orbit,
            click_every,
            output,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            dt,
            realtime,
            particles,
            seed,
            shape,
            points,
            model_scale,
            orbit,
            click_every,
            output,
        }),
        Commands::Config { check } => config::run(check.as_deref()),
    }
}
