use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only record of titles that could not be queued
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `<title> - <reason>`, creating the parent directory if needed
    pub fn record(&self, title: &str, reason: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} - {}", title, reason)?;

        debug!("Recorded failure for '{}' in {:?}", title, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_directory_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("failed.txt");
        let log = FailureLog::new(&path);

        log.record("Movie A", "Not found on YTS").unwrap();
        log.record("Movie B", "No magnet link found").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Movie A - Not found on YTS\nMovie B - No magnet link found\n"
        );
    }

    #[test]
    fn test_never_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("failed.txt");
        fs::write(&path, "Earlier - Login failed\n").unwrap();

        FailureLog::new(&path).record("Later", "boom").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Earlier - Login failed\nLater - boom\n");
    }

    #[test]
    fn test_write_error_propagates() {
        let dir = TempDir::new().unwrap();
        // The log path is an existing directory, so opening it for append fails
        let log = FailureLog::new(dir.path());
        assert!(log.record("Movie", "reason").is_err());
    }
}
