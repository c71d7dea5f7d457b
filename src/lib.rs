//! rag-config: start-up configuration for the RAG retrieval service
//!
//! Loads `.env` and `.env.docker` from the install directory, merges them
//! over the process environment, and derives the paths, model name, database
//! and service-bind settings the service runs with.

pub mod config;
pub mod domain;
pub mod utils;

pub use config::{init, load, ConfigError, Environment};
pub use domain::{DatabaseConfig, RagConfig, ServiceConfig};
