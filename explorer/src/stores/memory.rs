//! In-memory record store.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{RecordStore, SaveOutcome};
use crate::core::ProfileRecord;

/// Keeps saved records in memory, in save order.
///
/// Can be switched into a rejecting mode to exercise the save failure path.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<ProfileRecord>>,
    reject_writes: AtomicBool,
}

impl MemoryRecordStore {
    /// Creates an empty store that accepts writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects every write.
    #[must_use]
    pub fn rejecting() -> Self {
        let store = Self::default();
        store.set_reject_writes(true);
        store
    }

    /// Switches write rejection on or off.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Returns all stored records.
    #[must_use]
    pub fn records(&self) -> Vec<ProfileRecord> {
        self.records.lock().clone()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn save(&self, record: &ProfileRecord) -> SaveOutcome {
        if self.reject_writes.load(Ordering::SeqCst) {
            return SaveOutcome::rejected("Saving the user record failed");
        }
        self.records.lock().push(record.clone());
        SaveOutcome::Stored
    }
}
