//! Railway composition of the four stages.

use chrono::Utc;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::ProfilePipelineBuilder;
use crate::config::ExplorerConfig;
use crate::core::{PipelineStage, ProfileRecord};
use crate::errors::PipelineError;
use crate::events::{EventSink, NoOpEventSink, PipelineEvent};
use crate::observability::StageTimer;
use crate::stages::{Annotator, Decoder, Persister, ProfileSource};
use crate::stores::RecordStore;

/// Fetch, decode, annotate and persist one profile per run.
///
/// A run stops at the first failing stage and returns its error; later
/// stages are not invoked. The pipeline keeps no state between runs, so one
/// instance can serve many runs, including concurrent ones.
#[derive(Clone)]
pub struct ProfilePipeline {
    source: Arc<dyn ProfileSource>,
    decoder: Decoder,
    annotator: Annotator,
    persister: Persister,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for ProfilePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePipeline")
            .field("decoder", &self.decoder)
            .field("annotator", &self.annotator)
            .finish_non_exhaustive()
    }
}

impl ProfilePipeline {
    /// Creates a pipeline from its parts. Events are discarded.
    #[must_use]
    pub fn new(
        source: Arc<dyn ProfileSource>,
        decoder: Decoder,
        annotator: Annotator,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            source,
            decoder,
            annotator,
            persister: Persister::new(store),
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Starts a builder from a configuration.
    #[must_use]
    pub fn builder(config: ExplorerConfig) -> ProfilePipelineBuilder {
        ProfilePipelineBuilder::new(config)
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Runs the pipeline for one identifier.
    pub async fn run(&self, identifier: &str) -> Result<ProfileRecord, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("profile_run", %run_id, identifier);
        self.run_with_id(run_id, identifier).instrument(span).await
    }

    /// Runs independent pipelines for several identifiers concurrently.
    ///
    /// Results come back in input order; one run failing has no effect on
    /// the others.
    pub async fn run_all<I, S>(
        &self,
        identifiers: I,
    ) -> Vec<(String, Result<ProfileRecord, PipelineError>)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let results = join_all(identifiers.iter().map(|id| self.run(id))).await;
        identifiers.into_iter().zip(results).collect()
    }

    async fn run_with_id(
        &self,
        run_id: Uuid,
        identifier: &str,
    ) -> Result<ProfileRecord, PipelineError> {
        let started = Instant::now();
        self.events.emit(&PipelineEvent::RunStarted {
            run_id,
            identifier: identifier.to_string(),
            at: Utc::now(),
        });

        let result = self.run_stages(run_id, identifier).await;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(record) => {
                info!(username = record.username(), duration_ms, "Profile run completed");
                self.events.emit(&PipelineEvent::RunCompleted {
                    run_id,
                    username: record.username().to_string(),
                    duration_ms,
                    at: Utc::now(),
                });
            }
            Err(err) => {
                warn!(kind = %err.kind(), stage = %err.stage(), error = %err, "Profile run failed");
                self.events.emit(&PipelineEvent::RunFailed {
                    run_id,
                    kind: err.kind(),
                    duration_ms,
                    at: Utc::now(),
                });
            }
        }
        result
    }

    async fn run_stages(
        &self,
        run_id: Uuid,
        identifier: &str,
    ) -> Result<ProfileRecord, PipelineError> {
        let raw = self
            .stage(run_id, PipelineStage::Fetch, self.source.fetch(identifier))
            .await?;
        let record = self
            .stage(run_id, PipelineStage::Decode, async { self.decoder.decode(&raw) })
            .await?;
        let record = self
            .stage(run_id, PipelineStage::Annotate, async move {
                Ok(self.annotator.annotate(record))
            })
            .await?;
        self.stage(run_id, PipelineStage::Persist, self.persister.persist(record))
            .await
    }

    /// Awaits one stage, timing it and reporting its outcome.
    async fn stage<T, F>(
        &self,
        run_id: Uuid,
        stage: PipelineStage,
        step: F,
    ) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        let timer = StageTimer::start(stage);
        let result = step.await;
        let duration_ms = timer.finish();

        match &result {
            Ok(_) => {
                debug!(%stage, duration_ms, "Stage completed");
                self.events.emit(&PipelineEvent::StageCompleted {
                    run_id,
                    stage,
                    duration_ms,
                    at: Utc::now(),
                });
            }
            Err(err) => {
                debug!(%stage, duration_ms, error = %err, "Stage failed");
                self.events.emit(&PipelineEvent::StageFailed {
                    run_id,
                    stage,
                    kind: err.kind(),
                    message: err.to_string(),
                    duration_ms,
                    at: Utc::now(),
                });
            }
        }
        result
    }
}
