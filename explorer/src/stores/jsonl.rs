//! JSON-lines file store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use super::{RecordStore, SaveOutcome};
use crate::core::ProfileRecord;

/// Appends each record to a file as a single JSON line.
///
/// The file is created on first save. Each save opens the file in append
/// mode and writes the whole line in one call.
#[derive(Debug, Clone)]
pub struct JsonLinesRecordStore {
    path: PathBuf,
}

impl JsonLinesRecordStore {
    /// Creates a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, record: &ProfileRecord) -> Result<(), String> {
        let mut line = serde_json::to_string(record).map_err(|e| e.to_string())?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| format!("{}: {e}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| format!("{}: {e}", self.path.display()))?;
        file.flush()
            .await
            .map_err(|e| format!("{}: {e}", self.path.display()))
    }
}

#[async_trait]
impl RecordStore for JsonLinesRecordStore {
    async fn save(&self, record: &ProfileRecord) -> SaveOutcome {
        match self.append(record).await {
            Ok(()) => SaveOutcome::Stored,
            Err(reason) => {
                warn!(path = %self.path.display(), %reason, "Record write failed");
                SaveOutcome::rejected(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLinesRecordStore::new(dir.path().join("profiles.jsonl"));

        assert!(store.save(&ProfileRecord::new("alice", 5, 42, None)).await.is_stored());
        assert!(store.save(&ProfileRecord::new("bob ★", 21, 7, None)).await.is_stored());

        let text = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: ProfileRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second, ProfileRecord::new("bob ★", 21, 7, None));
    }

    #[tokio::test]
    async fn test_unwritable_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLinesRecordStore::new(dir.path().join("missing").join("profiles.jsonl"));

        let outcome = store.save(&ProfileRecord::new("alice", 5, 42, None)).await;
        match outcome {
            SaveOutcome::Rejected { reason } => assert!(reason.contains("profiles.jsonl")),
            SaveOutcome::Stored => panic!("write into a missing directory should fail"),
        }
    }
}
