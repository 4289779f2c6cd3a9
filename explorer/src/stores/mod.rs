//! Record stores: where persisted profiles end up.
//!
//! The persist stage only sees the [`RecordStore`] trait. Three stores are
//! provided:
//! - [`MemoryRecordStore`] keeps records in memory
//! - [`JsonLinesRecordStore`] appends records to a file, one JSON object per line
//! - [`FlagRecordStore`] adapts a collaborator that reports failure as `true`

mod flag;
mod jsonl;
mod memory;

pub use flag::FlagRecordStore;
pub use jsonl::JsonLinesRecordStore;
pub use memory::MemoryRecordStore;

use async_trait::async_trait;

use crate::core::ProfileRecord;

/// Result of handing a record to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was stored.
    Stored,
    /// The store refused the record.
    Rejected {
        /// Why the write was refused.
        reason: String,
    },
}

impl SaveOutcome {
    /// Creates a rejected outcome.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns true if the record was stored.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// Trait for sinks that durably store profile records.
///
/// Stores guard their own state; the pipeline issues one save per run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Saves a record.
    async fn save(&self, record: &ProfileRecord) -> SaveOutcome;
}
