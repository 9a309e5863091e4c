use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aggregate;
mod codec;
mod commands;
mod config;
mod models;
mod sync;

use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ExercisesCommand, ExportCommand,
    ImportCommand, ListCommand, PlanCommand, StatsCommand,
};
use config::Config;
use sync::{HttpRemote, LocalCache, SyncEngine};

#[derive(Parser)]
#[command(name = "strengthlog")]
#[command(version)]
#[command(about = "A strength and plyometrics training log", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a training entry
    Add(AddCommand),

    /// List entries with optional filters
    List(ListCommand),

    /// Edit an existing entry
    Edit(EditCommand),

    /// Delete an entry, or the whole log
    Delete(DeleteCommand),

    /// Export the log to CSV
    Export(ExportCommand),

    /// Import entries from a CSV file
    Import(ImportCommand),

    /// Volume and per-exercise progress summaries
    Stats(StatsCommand),

    /// Show the exercise catalog
    Exercises(ExercisesCommand),

    /// Show the 4-week training plan
    Plan(PlanCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strengthlog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Add(cmd)) => {
            let mut engine = load_engine(&config).await;
            cmd.run(&mut engine).await
        }
        Some(Commands::List(cmd)) => {
            let engine = load_engine(&config).await;
            cmd.run(&engine)
        }
        Some(Commands::Edit(cmd)) => {
            let mut engine = load_engine(&config).await;
            cmd.run(&mut engine).await
        }
        Some(Commands::Delete(cmd)) => {
            let mut engine = load_engine(&config).await;
            cmd.run(&mut engine).await
        }
        Some(Commands::Export(cmd)) => {
            let engine = load_engine(&config).await;
            cmd.run(&engine)
        }
        Some(Commands::Import(cmd)) => {
            let mut engine = load_engine(&config).await;
            cmd.run(&mut engine).await
        }
        Some(Commands::Stats(cmd)) => {
            let engine = load_engine(&config).await;
            cmd.run(&engine)
        }
        Some(Commands::Exercises(cmd)) => cmd.run(),
        Some(Commands::Plan(cmd)) => cmd.run(),
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

/// Builds the session engine: one remote list attempt, cache fallback.
/// Completes before any command logic runs.
async fn load_engine(config: &Config) -> SyncEngine<HttpRemote> {
    let remote = HttpRemote::new(config.server_url.clone());
    if !remote.is_configured() {
        tracing::warn!("No server_url configured, working from the local cache");
    }
    let cache = LocalCache::new(config.data_dir.clone());
    SyncEngine::initialize(remote, cache).await
}
