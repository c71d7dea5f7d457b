//! Env file loading and configuration resolution
//!
//! Pipeline: env files on disk, merged into an [`Environment`] with
//! precedence (process env and `.env` > `.env.docker`), then derived into a
//! [`crate::domain::RagConfig`] with literal defaults.

pub mod environment;
pub mod error;
pub mod loader;
pub mod resolve;

pub use environment::{
    merge_env_files, Environment, EnvFileReport, FileStatus, FALLBACK_ENV_FILE, PRIMARY_ENV_FILE,
};
pub use error::ConfigError;
pub use loader::{load_env_file, parse_line, EnvEntries, EnvEntry, EnvFileLoad};
pub use resolve::{derive_config, ensure_data_dir, init, load, load_with, resolve_config, Resolved};
