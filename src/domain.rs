//! Resolved configuration types shared by the resolver and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Placeholder printed instead of secrets.
pub const REDACTED: &str = "***";

/// Fully derived configuration for the RAG service.
///
/// Built once by [`crate::config::resolve_config`] and handed to the
/// components that need it. There are no setters on purpose: the values are
/// final for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// Directory holding the knowledge base files.
    pub data_dir: PathBuf,
    /// Vector index file.
    pub index_path: PathBuf,
    /// Chunk metadata file that sits next to the index.
    pub meta_path: PathBuf,
    /// Embedding model identifier or local model path.
    pub model_name: String,
    pub database: DatabaseConfig,
    pub service: ServiceConfig,
}

impl RagConfig {
    /// Copy of the config safe to print or log.
    pub fn redacted(&self) -> Self {
        Self { database: self.database.redacted(), ..self.clone() }
    }

    /// Non-fatal problems worth surfacing at start-up.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        // The MySQL client refuses to connect without these.
        if self.database.host.trim().is_empty() {
            warnings.push("Database host is empty".to_string());
        }
        if self.database.user.trim().is_empty() {
            warnings.push("Database user is empty".to_string());
        }

        if !self.index_path.exists() {
            warnings.push(format!("Index file not found: {}", self.index_path.display()));
        }
        if !self.meta_path.exists() {
            warnings.push(format!("Metadata file not found: {}", self.meta_path.display()));
        }

        warnings
    }
}

/// Database connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }

    pub fn redacted(&self) -> Self {
        Self { password: REDACTED.to_string(), ..self.clone() }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("database", &self.database)
            .finish()
    }
}

/// HTTP bind parameters for the retrieval service.
///
/// Not overridable from the environment; see [`ServiceConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000, log_level: "info".to_string() }
    }
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr().parse()
    }
}
