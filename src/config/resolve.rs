//! Derived configuration
//!
//! | Setting        | Variable         | Default                   |
//! |----------------|------------------|---------------------------|
//! | data dir       | `RAG_DATA_DIR`   | `<base>/data/kb`          |
//! | index path     | `RAG_INDEX_PATH` | `<data dir>/index.faiss`  |
//! | metadata path  | `RAG_META_PATH`  | `<data dir>/meta.json`    |
//! | model name     | `RAG_MODEL_NAME` | `./model`                 |
//! | db host        | `RAG_DB_HOST`    | `localhost`               |
//! | db port        | `RAG_DB_PORT`    | `3306`                    |
//! | db user        | `RAG_DB_USER`    | `root`                    |
//! | db password    | `RAG_DB_PASS`    | `root`                    |
//! | db name        | `RAG_DB_NAME`    | `mental_health`           |
//!
//! Service bind settings are fixed; see [`ServiceConfig::default`].
//! A variable set to an empty string still counts as set.

use super::environment::{merge_env_files, EnvFileReport, Environment};
use super::error::ConfigError;
use crate::domain::{DatabaseConfig, RagConfig, ServiceConfig};
use crate::utils::install_base_dir;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "RAG_DATA_DIR";
pub const ENV_INDEX_PATH: &str = "RAG_INDEX_PATH";
pub const ENV_META_PATH: &str = "RAG_META_PATH";
pub const ENV_MODEL_NAME: &str = "RAG_MODEL_NAME";
pub const ENV_DB_HOST: &str = "RAG_DB_HOST";
pub const ENV_DB_PORT: &str = "RAG_DB_PORT";
pub const ENV_DB_USER: &str = "RAG_DB_USER";
pub const ENV_DB_PASS: &str = "RAG_DB_PASS";
pub const ENV_DB_NAME: &str = "RAG_DB_NAME";

const DEFAULT_MODEL_NAME: &str = "./model";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_DB_PASS: &str = "root";
const DEFAULT_DB_NAME: &str = "mental_health";

/// Everything produced by one start-up resolution pass.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: RagConfig,
    pub report: EnvFileReport,
    pub environment: Environment,
}

/// Compute the configuration from `env` without touching the file system.
pub fn derive_config(env: &Environment, base_dir: &Path) -> Result<RagConfig, ConfigError> {
    let data_dir = path_or(env, ENV_DATA_DIR, || base_dir.join("data").join("kb"));
    let index_path = path_or(env, ENV_INDEX_PATH, || data_dir.join("index.faiss"));
    let meta_path = path_or(env, ENV_META_PATH, || data_dir.join("meta.json"));
    let model_name = string_or(env, ENV_MODEL_NAME, DEFAULT_MODEL_NAME);

    let database = DatabaseConfig {
        host: string_or(env, ENV_DB_HOST, DEFAULT_DB_HOST),
        port: port_or(env, ENV_DB_PORT, DEFAULT_DB_PORT)?,
        user: string_or(env, ENV_DB_USER, DEFAULT_DB_USER),
        password: string_or(env, ENV_DB_PASS, DEFAULT_DB_PASS),
        database: string_or(env, ENV_DB_NAME, DEFAULT_DB_NAME),
    };

    Ok(RagConfig {
        data_dir,
        index_path,
        meta_path,
        model_name,
        database,
        service: ServiceConfig::default(),
    })
}

/// Create the data directory and its parents. Succeeds if it already exists.
pub fn ensure_data_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path)
        .map_err(|source| ConfigError::CreateDataDir { path: path.to_path_buf(), source })
}

/// Derive the configuration and create its data directory.
pub fn resolve_config(env: &Environment, base_dir: &Path) -> Result<RagConfig, ConfigError> {
    let config = derive_config(env, base_dir)?;
    ensure_data_dir(&config.data_dir)?;
    tracing::debug!("Resolved RAG config: {:?}", config);
    Ok(config)
}

/// Merge the env files under `base_dir` into `env`, then resolve.
pub fn load_with(mut env: Environment, base_dir: &Path) -> Result<Resolved, ConfigError> {
    let report = merge_env_files(base_dir, &mut env);
    let config = resolve_config(&env, base_dir)?;
    Ok(Resolved { config, report, environment: env })
}

/// Resolve against the current process environment.
///
/// `base_dir` defaults to the install directory of the running executable.
pub fn load(base_dir: Option<&Path>) -> Result<Resolved, ConfigError> {
    let base_dir = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => install_base_dir().map_err(ConfigError::InstallDir)?,
    };
    load_with(Environment::from_process(), &base_dir)
}

/// Start-up entry point: resolve, then export env file values to the process
/// so components reading ambient variables see them too.
pub fn init(base_dir: Option<&Path>) -> Result<RagConfig, ConfigError> {
    let resolved = load(base_dir)?;
    resolved.environment.export_to_process();
    Ok(resolved.config)
}

fn string_or(env: &Environment, key: &str, default: &str) -> String {
    env.get(key).unwrap_or(default).to_string()
}

fn path_or(env: &Environment, key: &str, default: impl FnOnce() -> PathBuf) -> PathBuf {
    env.get(key).map(PathBuf::from).unwrap_or_else(default)
}

fn port_or(env: &Environment, key: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env.get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|source| ConfigError::InvalidPort {
            var: key,
            value: raw.to_string(),
            source,
        }),
    }
}
