//! Pipeline builder.

use std::sync::Arc;

use super::ProfilePipeline;
use crate::config::ExplorerConfig;
use crate::errors::ConfigError;
use crate::events::{EventSink, NoOpEventSink};
use crate::stages::{Annotator, Decoder, HttpProfileSource, ProfileSource};
use crate::stores::{MemoryRecordStore, RecordStore};

/// Builder for a [`ProfilePipeline`].
///
/// Anything not overridden comes from the configuration: an HTTP source for
/// `config.fetch`, an in-memory store, and no event sink.
pub struct ProfilePipelineBuilder {
    config: ExplorerConfig,
    source: Option<Arc<dyn ProfileSource>>,
    store: Option<Arc<dyn RecordStore>>,
    events: Option<Arc<dyn EventSink>>,
}

impl std::fmt::Debug for ProfilePipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePipelineBuilder")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .field("has_store", &self.store.is_some())
            .field("has_events", &self.events.is_some())
            .finish()
    }
}

impl ProfilePipelineBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            source: None,
            store: None,
            events: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Uses `source` instead of the HTTP source.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn ProfileSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Uses `store` instead of the in-memory store.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sends run events to `events`.
    #[must_use]
    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    /// Validates the configuration and assembles the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<ProfilePipeline, ConfigError> {
        self.config.validate()?;

        let source: Arc<dyn ProfileSource> = match self.source {
            Some(source) => source,
            None => Arc::new(HttpProfileSource::new(self.config.fetch.clone())?),
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryRecordStore::new()));
        let events = self.events.unwrap_or_else(|| Arc::new(NoOpEventSink));

        Ok(ProfilePipeline::new(
            source,
            Decoder::new(self.config.decode),
            Annotator::new(self.config.annotate),
            store,
        )
        .with_event_sink(events))
    }
}
