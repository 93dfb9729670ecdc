//! Codepal CLI - ask a local model to explain, review or refactor code.

use clap::{Parser, Subcommand};
use codepal_core::Mode;
use std::path::PathBuf;

mod commands;
mod render;
mod session;

/// Codepal - a code assistant backed by a locally served model
#[derive(Parser)]
#[command(name = "codepal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Chat {
        /// Initial mode (explain, review, refactor, ask)
        #[arg(short, long, default_value = "explain")]
        mode: Mode,
    },

    /// Submit a single snippet or question
    Ask {
        /// What to do with the input (explain, review, refactor, ask)
        #[arg(short, long, default_value = "explain")]
        mode: Mode,
        /// Read input from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Output the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Input text (read from stdin when omitted)
        text: Option<String>,
    },

    /// Check that the model server is running and the model is available
    Check,

    /// Show the effective configuration
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    match cli.command {
        Commands::Chat { mode } => commands::chat::run(&runtime, mode),
        Commands::Ask {
            mode,
            file,
            json,
            text,
        } => runtime.block_on(commands::ask::run(mode, file.as_deref(), text, json)),
        Commands::Check => runtime.block_on(commands::check::run()),
        Commands::Info => commands::info::run(),
    }
}
