//! Adapter for boolean-reporting save collaborators.

use async_trait::async_trait;
use std::fmt;

use super::{RecordStore, SaveOutcome};
use crate::core::ProfileRecord;

/// Wraps a `save(record) -> bool` collaborator whose `true` means the save
/// FAILED.
///
/// The inverted flag stops here; everything past this adapter sees a
/// [`SaveOutcome`].
pub struct FlagRecordStore<F>
where
    F: Fn(&ProfileRecord) -> bool + Send + Sync,
{
    save_failed: F,
}

impl<F> FlagRecordStore<F>
where
    F: Fn(&ProfileRecord) -> bool + Send + Sync,
{
    /// Creates the adapter. `save_failed` returns `true` on failure.
    pub fn new(save_failed: F) -> Self {
        Self { save_failed }
    }
}

impl<F> fmt::Debug for FlagRecordStore<F>
where
    F: Fn(&ProfileRecord) -> bool + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagRecordStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> RecordStore for FlagRecordStore<F>
where
    F: Fn(&ProfileRecord) -> bool + Send + Sync,
{
    async fn save(&self, record: &ProfileRecord) -> SaveOutcome {
        if (self.save_failed)(record) {
            SaveOutcome::rejected("Saving the user record failed")
        } else {
            SaveOutcome::Stored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_true_means_failure() {
        let store = FlagRecordStore::new(|_| true);
        let outcome = store.save(&ProfileRecord::new("alice", 5, 42, None)).await;
        assert_eq!(outcome, SaveOutcome::rejected("Saving the user record failed"));
    }

    #[tokio::test]
    async fn test_false_means_stored() {
        let store = FlagRecordStore::new(|_| false);
        let outcome = store.save(&ProfileRecord::new("alice", 5, 42, None)).await;
        assert_eq!(outcome, SaveOutcome::Stored);
    }

    #[tokio::test]
    async fn test_collaborator_sees_record() {
        let store = FlagRecordStore::new(|record: &ProfileRecord| record.external_id() == 13);
        assert!(!store.save(&ProfileRecord::new("unlucky", 0, 13, None)).await.is_stored());
        assert!(store.save(&ProfileRecord::new("lucky", 0, 7, None)).await.is_stored());
    }
}
