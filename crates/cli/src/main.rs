//! GameChat CLI: the main entry point.
//!
//! Commands:
//! - `init`     : Write a default config file
//! - `serve`    : Start the HTTP gateway
//! - `ask`      : Ask one question, or chat interactively
//! - `summarize`: Generate (or show) the column summaries
//! - `doctor`   : Diagnose configuration and dataset

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "gamechat",
    about = "GameChat: ask questions about a video-game dataset",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.gamechat/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask about the dataset
    Ask {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Generate the column summaries side file
    Summarize {
        /// Regenerate even if the side file already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Diagnose configuration, dataset, and provider
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::init::run(config_path).await?,
        Commands::Serve { port } => commands::serve::run(config_path, port).await?,
        Commands::Ask { message } => commands::ask::run(config_path, message).await?,
        Commands::Summarize { force } => commands::summarize::run(config_path, force).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
    }

    Ok(())
}
