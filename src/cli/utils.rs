//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use rag_config::config::{self, Resolved};
use std::path::PathBuf;

#[derive(Args)]
pub struct BaseDirArgs {
    /// Directory holding .env, .env.docker and data/ (defaults to the executable's directory)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

impl BaseDirArgs {
    pub fn resolve(&self) -> Result<Resolved> {
        config::load(self.base_dir.as_deref()).context("Failed to resolve configuration")
    }
}

const SECRET_MARKERS: &[&str] = &["PASS", "SECRET", "TOKEN", "KEY"];

/// Whether a variable name looks like it holds a credential.
pub fn is_secret_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|marker| upper.contains(marker))
}
