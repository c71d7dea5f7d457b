//! Environment state and env file precedence

use super::loader::{load_env_file, EnvEntry, EnvFileLoad};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Primary env file; its entries override everything.
pub const PRIMARY_ENV_FILE: &str = ".env";
/// Fallback env file; its entries only fill keys that are still unset.
pub const FALLBACK_ENV_FILE: &str = ".env.docker";

/// Explicit key/value environment the configuration is derived from.
///
/// Usually seeded from the process environment. Env files are merged into
/// this value rather than into the process, so resolution can run (and be
/// tested) without touching global state. Keys set by the merge are tracked
/// in the order they were first set and can be exported with
/// [`Environment::export_to_process`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    /// Present in the process but not valid Unicode; never readable, never filled.
    opaque: BTreeSet<OsString>,
    assigned: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Build from raw OS pairs.
    ///
    /// Variables whose name or value is not valid Unicode cannot be read back
    /// through [`Environment::get`], but they still count as present, so the
    /// fallback file never fills them.
    pub fn from_vars_os<I: IntoIterator<Item = (OsString, OsString)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (key, value) in iter {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    env.vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    tracing::debug!("Process variable {} has a non-Unicode value", key);
                    env.opaque.insert(OsString::from(key));
                }
                (Err(key), _) => {
                    env.opaque.insert(key);
                }
            }
        }
        env
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key) || self.opaque.contains(OsStr::new(key))
    }

    pub fn len(&self) -> usize {
        self.vars.len() + self.opaque.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set `key`, overwriting any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.opaque.remove(OsStr::new(&key));
        if !self.assigned.contains(&key) {
            self.assigned.push(key.clone());
        }
        self.vars.insert(key, value.into());
    }

    /// Set `key` only if it is not present yet. Returns whether it was set.
    pub fn set_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.set(key, value);
        true
    }

    /// Keys set through [`Environment::set`], in first-set order, with their
    /// current values.
    pub fn assigned(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assigned
            .iter()
            .filter_map(|k| self.vars.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    /// Write every assigned key into the process environment.
    ///
    /// Only call this during single-threaded start-up, before other threads
    /// read the environment.
    pub fn export_to_process(&self) {
        for (key, value) in self.assigned() {
            std::env::set_var(key, value);
        }
        tracing::debug!("Exported {} env file variables to the process", self.assigned.len());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { vars, ..Self::default() }
    }
}

/// What happened to one env file during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: PathBuf,
    /// The file exists, whether or not it could be opened.
    pub found: bool,
    pub loaded: bool,
    /// Entries actually written into the environment.
    pub applied: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileReport {
    pub primary: FileStatus,
    pub fallback: FileStatus,
}

/// Merge `<base_dir>/.env` and `<base_dir>/.env.docker` into `env`.
///
/// `.env` entries overwrite unconditionally; `.env.docker` entries only
/// apply to keys still missing afterwards. Prints one status line per file.
pub fn merge_env_files(base_dir: &Path, env: &mut Environment) -> EnvFileReport {
    let primary = apply_env_file(&base_dir.join(PRIMARY_ENV_FILE), env, Precedence::Override);
    println!("{}", status_line(PRIMARY_ENV_FILE, &primary, ""));

    let fallback = apply_env_file(&base_dir.join(FALLBACK_ENV_FILE), env, Precedence::FillMissing);
    println!("{}", status_line(FALLBACK_ENV_FILE, &fallback, " (missing keys)"));

    EnvFileReport { primary, fallback }
}

fn status_line(name: &str, status: &FileStatus, loaded_suffix: &str) -> String {
    match (status.found, status.loaded) {
        (_, true) => format!("Loaded {}{}", name, loaded_suffix),
        (true, false) => format!("{} found but not loaded", name),
        (false, false) => format!("{} not found", name),
    }
}

#[derive(Debug, Clone, Copy)]
enum Precedence {
    Override,
    FillMissing,
}

fn apply_env_file(path: &Path, env: &mut Environment, precedence: Precedence) -> FileStatus {
    let load = load_env_file(path);
    let found = !matches!(load, EnvFileLoad::Missing);
    let loaded = load.is_loaded();

    let mut applied = 0;
    for EnvEntry { key, value } in load.into_entries() {
        let written = match precedence {
            Precedence::Override => {
                env.set(key, value);
                true
            }
            Precedence::FillMissing => env.set_if_absent(key, value),
        };
        if written {
            applied += 1;
        }
    }

    tracing::debug!("Applied {} entries from {} ({:?})", applied, path.display(), precedence);
    FileStatus { path: path.to_path_buf(), found, loaded, applied }
}
