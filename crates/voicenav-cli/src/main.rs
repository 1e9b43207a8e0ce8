use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use voicenav_infrastructure::ConfigService;

mod commands;

#[derive(Parser)]
#[command(name = "voicenav")]
#[command(about = "Voice navigation - route spoken room names to map waypoints", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/voicenav/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `catalog.maps_path` from the configuration
    #[arg(long, global = true)]
    maps_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read recognized phrases from stdin and print navigation events
    Serve {
        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// List available map generations, newest first
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the waypoints of one map generation
    Show {
        /// Generation folder name, e.g. map_20250213_120000
        id: String,
    },
    /// Resolve a phrase to a room category without navigating
    Resolve {
        #[arg(required = true)]
        phrase: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = service.load()?;
    if let Some(maps_path) = cli.maps_path {
        config.catalog.maps_path = maps_path;
    }

    init_logging(&config.log_level);
    tracing::debug!(config = %service.path().display(), "configuration loaded");

    match cli.command {
        Commands::Serve { json } => commands::serve::run(&config, json).await?,
        Commands::List { limit } => commands::list::run(&config, limit).await?,
        Commands::Show { id } => commands::show::run(&config, &id).await?,
        Commands::Resolve { phrase } => commands::resolve::run(&config, &phrase.join(" "))?,
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only events and command output.
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
