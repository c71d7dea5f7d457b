//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::utils::BaseDirArgs;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Toml,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub base: BaseDirArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print the database password instead of a placeholder
    #[arg(long)]
    pub show_secrets: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let resolved = args.base.resolve()?;
    let config = if args.show_secrets { resolved.config } else { resolved.config.redacted() };

    let rendered = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&config).context("Failed to serialize config as JSON")?
        }
        OutputFormat::Toml => {
            toml::to_string_pretty(&config).context("Failed to serialize config as TOML")?
        }
    };
    println!("{}", rendered);

    Ok(())
}
