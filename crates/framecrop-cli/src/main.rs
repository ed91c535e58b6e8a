mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framecrop", about = "Circle crop and rounded corner image tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an image and show its dimensions and export sizes
    Info(commands::info::InfoArgs),
    /// Place an image in the frame and export the crop
    Crop(commands::crop::CropArgs),
    /// Replay a recorded interaction script, then export
    Replay(commands::replay::ReplayArgs),
    /// Render the interactive preview canvas to a PNG
    Preview(commands::preview::PreviewArgs),
    /// Print or save a default tool config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
