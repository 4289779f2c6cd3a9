//! Persist stage: hand the record to a store.

use std::sync::Arc;

use crate::core::ProfileRecord;
use crate::errors::PipelineError;
use crate::stores::{RecordStore, SaveOutcome};

/// Writes records to a [`RecordStore`] and turns a refusal into
/// [`PipelineError::UserInfoSaveFailed`].
#[derive(Clone)]
pub struct Persister {
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister").finish_non_exhaustive()
    }
}

impl Persister {
    /// Creates a persister over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Saves the record. On success the same record is returned unchanged.
    pub async fn persist(&self, record: ProfileRecord) -> Result<ProfileRecord, PipelineError> {
        match self.store.save(&record).await {
            SaveOutcome::Stored => Ok(record),
            SaveOutcome::Rejected { reason } => Err(PipelineError::save_failed(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{FlagRecordStore, MockRecordStore};

    #[test]
    fn test_persist_passes_record_through() {
        let mut store = MockRecordStore::new();
        store
            .expect_save()
            .withf(|record| record.username() == "alice")
            .times(1)
            .returning(|_| SaveOutcome::Stored);

        let persister = Persister::new(Arc::new(store));
        let record = ProfileRecord::new("alice", 5, 42, None);
        let saved = tokio_test::block_on(persister.persist(record.clone())).unwrap();

        assert_eq!(saved, record);
    }

    #[test]
    fn test_persist_rejection_is_save_failed() {
        let mut store = MockRecordStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| SaveOutcome::rejected("quota exceeded"));

        let persister = Persister::new(Arc::new(store));
        let err = tokio_test::block_on(persister.persist(ProfileRecord::new("alice", 5, 42, None)))
            .unwrap_err();

        assert_eq!(err, PipelineError::save_failed("quota exceeded"));
    }

    #[test]
    fn test_inverted_flag_collaborator() {
        // The legacy collaborator answers `true` when the save failed.
        let failing = Persister::new(Arc::new(FlagRecordStore::new(|_| true)));
        let err = tokio_test::block_on(failing.persist(ProfileRecord::new("a", 1, 1, None)))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UserInfoSaveFailed { .. }));

        let working = Persister::new(Arc::new(FlagRecordStore::new(|_| false)));
        assert!(tokio_test::block_on(working.persist(ProfileRecord::new("a", 1, 1, None))).is_ok());
    }
}
