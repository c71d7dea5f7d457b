//! Env file loading

use crate::utils::open_text_reader;
use std::io::{BufRead, Lines};
use std::path::{Path, PathBuf};

/// A single `KEY=VALUE` assignment read from an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Outcome of trying to open an env file.
pub enum EnvFileLoad {
    /// No file at the path. Expected and normal.
    Missing,
    /// The file exists but could not be opened; the error was already reported.
    Unreadable,
    Loaded(EnvEntries),
}

impl EnvFileLoad {
    pub fn is_loaded(&self) -> bool {
        matches!(self, EnvFileLoad::Loaded(_))
    }

    /// Entries of a loaded file; empty for missing or unreadable ones.
    pub fn into_entries(self) -> impl Iterator<Item = EnvEntry> {
        match self {
            EnvFileLoad::Loaded(entries) => Some(entries),
            EnvFileLoad::Missing | EnvFileLoad::Unreadable => None,
        }
        .into_iter()
        .flatten()
    }
}

/// Open an env file for lazy scanning.
///
/// Nothing is read beyond the BOM until the returned entries are iterated.
/// Open failures are printed and reported as [`EnvFileLoad::Unreadable`],
/// never returned as errors.
pub fn load_env_file(path: &Path) -> EnvFileLoad {
    if !path.exists() {
        tracing::debug!("Env file not found: {}", path.display());
        return EnvFileLoad::Missing;
    }

    match open_text_reader(path) {
        Ok(reader) => EnvFileLoad::Loaded(EnvEntries::new(path.to_path_buf(), reader)),
        Err(e) => {
            report_read_error(path, &e);
            EnvFileLoad::Unreadable
        }
    }
}

/// Lazy sequence of entries from one env file.
///
/// Owns the file handle; it is closed when the sequence is exhausted or
/// dropped. A read error mid-file is reported once and ends the sequence.
pub struct EnvEntries {
    path: PathBuf,
    lines: Lines<Box<dyn BufRead>>,
    line_no: usize,
    finished: bool,
}

impl EnvEntries {
    fn new(path: PathBuf, reader: Box<dyn BufRead>) -> Self {
        Self { path, lines: reader.lines(), line_no: 0, finished: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for EnvEntries {
    type Item = EnvEntry;

    fn next(&mut self) -> Option<EnvEntry> {
        while !self.finished {
            match self.lines.next() {
                None => self.finished = true,
                Some(Err(e)) => {
                    report_read_error(&self.path, &e);
                    self.finished = true;
                }
                Some(Ok(line)) => {
                    self.line_no += 1;
                    if let Some(entry) = parse_line(&line) {
                        return Some(entry);
                    }
                    if is_malformed(&line) {
                        tracing::trace!(
                            "Skipping malformed line {} in {}",
                            self.line_no,
                            self.path.display()
                        );
                    }
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for EnvEntries {}

/// Parse one env file line.
///
/// Returns `None` for blank lines, `#` comments, lines without `=`, and
/// assignments that cannot live in a process environment (empty key, NUL).
pub fn parse_line(line: &str) -> Option<EnvEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_quotes(value.trim());

    if key.is_empty() || key.contains('\0') || value.contains('\0') {
        return None;
    }

    Some(EnvEntry::new(key, value))
}

/// Strip one matching pair of `"` or `'` around a value.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn is_malformed(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

fn report_read_error(path: &Path, err: &std::io::Error) {
    println!("Error loading {}: {}", path.display(), err);
    tracing::warn!("Failed reading env file {}: {}", path.display(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entries(path: &Path) -> Vec<(String, String)> {
        load_env_file(path).into_entries().map(|e| (e.key, e.value)).collect()
    }

    #[test]
    fn test_parse_plain_assignment() {
        assert_eq!(parse_line("RAG_DB_HOST=db"), Some(EnvEntry::new("RAG_DB_HOST", "db")));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        assert_eq!(
            parse_line("DSN=mysql://u:p@h/db?a=b"),
            Some(EnvEntry::new("DSN", "mysql://u:p@h/db?a=b"))
        );
    }

    #[test]
    fn test_parse_strips_matching_quotes() {
        assert_eq!(parse_line(r#"A="quoted value""#), Some(EnvEntry::new("A", "quoted value")));
        assert_eq!(parse_line("B='single'"), Some(EnvEntry::new("B", "single")));
        assert_eq!(parse_line(r#"C="""#), Some(EnvEntry::new("C", "")));
    }

    #[test]
    fn test_parse_keeps_mismatched_quotes() {
        assert_eq!(parse_line(r#"A="open'"#), Some(EnvEntry::new("A", r#""open'"#)));
        assert_eq!(parse_line(r#"B=""#), Some(EnvEntry::new("B", r#"""#)));
        // Only one pair is removed.
        assert_eq!(parse_line(r#"C=""x"""#), Some(EnvEntry::new("C", r#""x""#)));
    }

    #[test]
    fn test_parse_trims_around_separator() {
        assert_eq!(parse_line("  KEY = value  "), Some(EnvEntry::new("KEY", "value")));
        assert_eq!(parse_line("KEY=value\r"), Some(EnvEntry::new("KEY", "value")));
    }

    #[test]
    fn test_parse_skips_comments_blanks_and_malformed() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
        assert_eq!(parse_line("# RAG_DB_HOST=db"), None);
        assert_eq!(parse_line("   # indented comment"), None);
        assert_eq!(parse_line("NO_SEPARATOR"), None);
        assert_eq!(parse_line("=orphan"), None);
        assert_eq!(parse_line("A=nul\0byte"), None);
    }

    #[test]
    fn test_parse_allows_empty_value() {
        assert_eq!(parse_line("EMPTY="), Some(EnvEntry::new("EMPTY", "")));
    }

    #[test]
    fn test_missing_file_is_not_loaded() {
        let tmp = TempDir::new().expect("tmp");
        let load = load_env_file(&tmp.path().join(".env"));
        assert!(!load.is_loaded());
        assert!(matches!(load, EnvFileLoad::Missing));
        assert_eq!(load_env_file(&tmp.path().join(".env")).into_entries().count(), 0);
    }

    #[test]
    fn test_loads_entries_in_file_order() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".env");
        fs::write(
            &path,
            "# database\nRAG_DB_HOST=db\n\ngarbage line\nRAG_DB_PORT=\"3307\"\nRAG_DB_USER='rag'\n",
        )
        .expect("write");

        assert_eq!(
            entries(&path),
            vec![
                ("RAG_DB_HOST".to_string(), "db".to_string()),
                ("RAG_DB_PORT".to_string(), "3307".to_string()),
                ("RAG_DB_USER".to_string(), "rag".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_ends_sequence_without_panic() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".env");
        fs::write(&path, b"FIRST=1\nBAD=\xff\xfe\xfd\nLAST=3\n").expect("write");

        let load = load_env_file(&path);
        assert!(load.is_loaded());
        let got: Vec<_> = load.into_entries().map(|e| e.key).collect();
        assert_eq!(got, vec!["FIRST".to_string()]);
    }

    #[test]
    fn test_directory_path_is_reported_not_propagated() {
        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join(".env");
        fs::create_dir(&dir).expect("mkdir");

        // Opening a directory either fails outright or fails on the BOM sniff.
        let load = load_env_file(&dir);
        assert!(matches!(load, EnvFileLoad::Unreadable));
        assert!(!load.is_loaded());
        assert_eq!(load.into_entries().count(), 0);
    }

    #[test]
    fn test_sequence_is_restartable_by_reloading() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".env");
        fs::write(&path, "A=1\nB=2\n").expect("write");

        assert_eq!(entries(&path).len(), 2);
        assert_eq!(entries(&path).len(), 2);
    }
}
