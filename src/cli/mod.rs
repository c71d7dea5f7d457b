//! Command-line interface for rag-config
//!
//! Provides `show`, `check` and `env` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod env;
mod show;
mod utils;

/// Resolve env files and print the RAG service configuration
#[derive(Parser)]
#[command(name = "rag-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    ///
    /// Env file status lines are printed to stdout ahead of the rendered
    /// config. Drop them before piping the output into a JSON or TOML parser.
    Show(show::ShowArgs),

    /// Resolve the configuration and report problems
    Check(check::CheckArgs),

    /// Print the variables contributed by env files
    Env(env::EnvArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args),
        Commands::Check(args) => check::run(args),
        Commands::Env(args) => env::run(args),
    }
}
