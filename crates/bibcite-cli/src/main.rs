//! bibcite CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibcite_cli::commands;

#[derive(Parser)]
#[command(name = "bibcite")]
#[command(version)]
#[command(about = "Resolve [@key] citations in a rendered site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve citations in every document of a site
    Render {
        /// Site root directory
        #[arg(default_value = ".")]
        site: PathBuf,

        /// Write output to DIR (site relative, overrides output-dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only report warnings and errors
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match &cli.command {
        Commands::Render { quiet: true, .. } => "bibcite=warn",
        Commands::Render { .. } => "bibcite=info",
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Render {
            site,
            output_dir,
            quiet,
        } => commands::render::execute(commands::render::RenderArgs {
            site,
            output_dir,
            quiet,
        }),
    }
}
