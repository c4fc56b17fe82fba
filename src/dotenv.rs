//! Dotenv file reading.
//!
//! The format is deliberately small: one `KEY=VALUE` per line, blank lines and
//! `#` comment lines skipped, key and value trimmed, no quoting or escaping.
//! Lines without `=` are ignored rather than rejected.
//!
//! Dotenv values never replace a variable that is already set. Two entry
//! points apply that rule:
//!
//! - [`load_dotenv`] writes into the process environment. Call it during
//!   startup, before any other thread reads the environment.
//! - [`fill_missing`] writes into an environment snapshot, which is what tests
//!   and injected builders use.

use std::path::Path;

use crate::error::LayerfigError;

/// Conventional dotenv file name, resolved against the working directory.
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// Parse dotenv content into `(key, value)` pairs in file order.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, value)| is_representable(key, value))
        .collect()
}

/// Read and parse a dotenv file. A missing file yields no entries.
pub fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>, LayerfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let entries = parse_dotenv(&content);
            tracing::debug!(path = %path.display(), entries = entries.len(), "read dotenv file");
            Ok(entries)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(LayerfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Add dotenv entries to an environment snapshot, keeping existing values.
///
/// A key repeated within the file keeps its first value. Returns the number of
/// variables added.
pub fn fill_missing(
    vars: &mut Vec<(String, String)>,
    entries: impl IntoIterator<Item = (String, String)>,
) -> usize {
    let mut added = 0;
    for (key, value) in entries {
        if vars.iter().any(|(existing, _)| *existing == key) {
            continue;
        }
        vars.push((key, value));
        added += 1;
    }
    added
}

/// Load a dotenv file into the process environment without overwriting
/// variables that are already set. Returns the number of variables set.
///
/// Must be called before other threads start reading the environment.
pub fn load_dotenv(path: &Path) -> Result<usize, LayerfigError> {
    let mut set = 0;
    for (key, value) in read_dotenv(path)? {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        // SAFETY: the dotenv file is loaded once during startup, before the
        // process spawns threads that read the environment.
        unsafe { std::env::set_var(&key, &value) };
        set += 1;
    }
    tracing::debug!(path = %path.display(), set, "applied dotenv file to process environment");
    Ok(set)
}

fn is_representable(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains('\0') && !value.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_key_value_lines() {
        let entries = parse_dotenv("FOO=bar\nBAZ=qux\n");
        assert_eq!(entries, pairs(&[("FOO", "bar"), ("BAZ", "qux")]));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = parse_dotenv("# comment\n\n   # indented comment\nFOO=bar\n   \n");
        assert_eq!(entries, pairs(&[("FOO", "bar")]));
    }

    #[test]
    fn trims_key_and_value() {
        let entries = parse_dotenv("  DATABASE_PASSWORD =  s3cret  \n");
        assert_eq!(entries, pairs(&[("DATABASE_PASSWORD", "s3cret")]));
    }

    #[test]
    fn splits_on_first_equals() {
        let entries = parse_dotenv("URL=postgres://u:p@h/db?opt=1\n");
        assert_eq!(entries, pairs(&[("URL", "postgres://u:p@h/db?opt=1")]));
    }

    #[test]
    fn lines_without_equals_ignored() {
        let entries = parse_dotenv("just some text\nFOO=bar\n");
        assert_eq!(entries, pairs(&[("FOO", "bar")]));
    }

    #[test]
    fn quotes_are_kept_verbatim() {
        let entries = parse_dotenv("GREETING=\"hello world\"\n");
        assert_eq!(entries, pairs(&[("GREETING", "\"hello world\"")]));
    }

    #[test]
    fn empty_value_allowed_empty_key_skipped() {
        let entries = parse_dotenv("EMPTY=\n=orphan\n");
        assert_eq!(entries, pairs(&[("EMPTY", "")]));
    }

    #[test]
    fn missing_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let entries = read_dotenv(&dir.path().join(".env")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "APP__MAX_WORKERS=8\n").unwrap();
        assert_eq!(
            read_dotenv(&path).unwrap(),
            pairs(&[("APP__MAX_WORKERS", "8")])
        );
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let mut vars = pairs(&[("FOO", "bar")]);
        let added = fill_missing(&mut vars, pairs(&[("FOO", "baz"), ("NEW", "1")]));
        assert_eq!(added, 1);
        assert_eq!(vars, pairs(&[("FOO", "bar"), ("NEW", "1")]));
    }

    #[test]
    fn fill_missing_first_occurrence_in_file_wins() {
        let mut vars = Vec::new();
        fill_missing(&mut vars, pairs(&[("DUP", "first"), ("DUP", "second")]));
        assert_eq!(vars, pairs(&[("DUP", "first")]));
    }

    #[test]
    fn load_dotenv_does_not_override_process_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "LAYERFIG_TEST_DOTENV_PRESET=baz\nLAYERFIG_TEST_DOTENV_FRESH=new\n",
        )
        .unwrap();

        // SAFETY: these variable names are unique to this test.
        unsafe { std::env::set_var("LAYERFIG_TEST_DOTENV_PRESET", "bar") };

        let set = load_dotenv(&path).unwrap();
        assert_eq!(set, 1);
        assert_eq!(std::env::var("LAYERFIG_TEST_DOTENV_PRESET").unwrap(), "bar");
        assert_eq!(std::env::var("LAYERFIG_TEST_DOTENV_FRESH").unwrap(), "new");
    }
}
