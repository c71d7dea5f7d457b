//! Env command implementation

use anyhow::Result;
use clap::Args;
use rag_config::config::{merge_env_files, Environment};
use rag_config::domain::REDACTED;
use rag_config::utils::install_base_dir;

use super::utils::{is_secret_key, BaseDirArgs};

#[derive(Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub base: BaseDirArgs,

    /// Print secret-looking values instead of a placeholder
    #[arg(long)]
    pub show_secrets: bool,
}

pub fn run(args: EnvArgs) -> Result<()> {
    let base_dir = match args.base.base_dir {
        Some(dir) => dir,
        None => install_base_dir()?,
    };

    let mut env = Environment::from_process();
    merge_env_files(&base_dir, &mut env);

    for (key, value) in env.assigned() {
        let shown = if !args.show_secrets && is_secret_key(key) { REDACTED } else { value };
        println!("{}={}", key, shown);
    }

    Ok(())
}
