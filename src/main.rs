// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use locket_capture::FacingMode;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "locket-capture")]
#[command(about = "Camera capture and moment-sharing core for a Locket-style app")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a square still (tap gesture)
    Snap {
        /// Camera facing mode (front or rear)
        #[arg(short, long, default_value = "front")]
        facing: FacingMode,

        /// Output file path (default: save directory with timestamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a square clip (hold gesture)
    Record {
        /// Camera facing mode (front or rear)
        #[arg(short, long, default_value = "front")]
        facing: FacingMode,

        /// Recording duration in seconds (capped by the recording ceiling)
        #[arg(short, long, default_value = "5")]
        duration: u64,

        /// Output file path (default: save directory with timestamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize a local image or motion-JPEG file into a square asset
    Import {
        /// Input file
        input: PathBuf,

        /// Output file path (default: save directory with timestamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the full press-to-post flow against the console sink
    Post {
        /// Camera facing mode (front or rear)
        #[arg(short, long, default_value = "front")]
        facing: FacingMode,

        /// Press duration in milliseconds (under 1000 taps, over holds)
        #[arg(short, long, default_value = "300")]
        press_ms: u64,

        /// Caption attached to the post
        #[arg(short, long)]
        caption: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=locket_capture=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snap { facing, output } => cli::snap(facing, output),
        Commands::Record {
            facing,
            duration,
            output,
        } => cli::record(facing, duration, output),
        Commands::Import { input, output } => cli::import(input, output),
        Commands::Post {
            facing,
            press_ms,
            caption,
        } => cli::post(facing, press_ms, caption),
    }
}
