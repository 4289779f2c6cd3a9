//! Annotate stage: star marker for prolific users.

use crate::config::AnnotatorConfig;
use crate::core::ProfileRecord;

/// Appends the marker to the username when the public resource count is
/// strictly above the threshold. Total; never fails.
///
/// Applying it to an already annotated record appends the marker again.
#[must_use]
pub fn annotate(record: ProfileRecord, config: &AnnotatorConfig) -> ProfileRecord {
    if record.public_resource_count() > config.threshold {
        let username = format!("{}{}", record.username(), config.marker);
        record.with_username(username)
    } else {
        record
    }
}

/// Annotator bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    config: AnnotatorConfig,
}

impl Annotator {
    /// Creates an annotator.
    #[must_use]
    pub fn new(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotates a record.
    #[must_use]
    pub fn annotate(&self, record: ProfileRecord) -> ProfileRecord {
        annotate(record, &self.config)
    }
}
