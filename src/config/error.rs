//! Configuration errors

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems.
///
/// Missing env files and malformed lines are not errors; they are reported
/// and skipped during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': {source}")]
    InvalidPort {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to create data directory {}: {source}", .path.display())]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine install directory: {0}")]
    InstallDir(#[source] io::Error),
}
