//! Check command implementation

use anyhow::Result;
use clap::Args;
use rag_config::utils::display_path;

use super::utils::BaseDirArgs;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub base: BaseDirArgs,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let resolved = args.base.resolve()?;
    let config = &resolved.config;

    println!("Data directory: {}", display_path(&config.data_dir));
    println!("Model: {}", config.model_name);
    println!("Database: {}", config.database.redacted().connection_url());
    println!("Service: {} (log level {})", config.service.bind_addr(), config.service.log_level);

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in &warnings {
            println!("  {}", warning);
        }
    }

    println!("Configuration OK");
    Ok(())
}
