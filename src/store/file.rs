//! File-based store.
//!
//! Reads a JSON export of the database path from disk. The file uses the
//! same layout as the REST body: an object of `"<epoch seconds>": reading`,
//! or `null` for an empty path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::{parse_snapshot, SnapshotStore};
use crate::data::RawSnapshot;
use crate::error::StoreError;

/// A store that re-reads a local JSON file on every poll.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    description: String,
}

impl FileStore {
    /// Create a new file store for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn get(&self) -> Result<Option<RawSnapshot>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Connection(format!("Read error: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let body: Value = serde_json::from_str(&content)?;
        parse_snapshot(body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_store_new() {
        let store = FileStore::new("/tmp/readings.json");
        assert_eq!(store.path(), Path::new("/tmp/readings.json"));
        assert_eq!(store.description(), "file: /tmp/readings.json");
    }

    #[tokio::test]
    async fn test_file_store_reads_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"1700000000": 21.5, "9": 3}}"#).unwrap();

        let snapshot = FileStore::new(file.path()).get().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["9"], 3.0);
    }

    #[tokio::test]
    async fn test_file_store_null_and_blank() {
        let mut null_file = NamedTempFile::new().unwrap();
        writeln!(null_file, "null").unwrap();
        assert!(FileStore::new(null_file.path()).get().await.unwrap().is_none());

        let blank_file = NamedTempFile::new().unwrap();
        assert!(FileStore::new(blank_file.path()).get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let err = FileStore::new("/nonexistent/path/readings.json").get().await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(msg) if msg.contains("Read error")));
    }

    #[tokio::test]
    async fn test_file_store_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let err = FileStore::new(file.path()).get().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
