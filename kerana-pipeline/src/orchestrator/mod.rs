//! Orchestrator module for the Kerana pipeline.
//!
//! Coordinates index preparation, the source cursor, the processor and the
//! loader for one transfer run.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{info, instrument, warn};

use crate::config::TransferConfig;
use crate::errors::PipelineError;
use crate::loader::BulkLoader;
use crate::processor::{IdentityProcessor, PersonProcessor, RecordProcessor};
use kerana_repository::{
    person_completion_mapping, person_pipeline, IndexStore, RecordSource, SourceQuery,
};
use kerana_shared::IndexMapping;

/// Outcome of a completed transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    /// Documents written to the index.
    pub documents: usize,
    /// Bulk requests submitted.
    pub batches: usize,
    /// Malformed records skipped (only with `skip_malformed`).
    pub skipped: usize,
}

/// One transfer from a source collection into a search index.
///
/// The transfer:
/// - Optionally deletes the destination index, then creates it if missing
/// - Reads the source cursor strictly in order
/// - Turns every record into one bulk operation
/// - Hands operations to the loader, which flushes full batches and the final partial one
///
/// The first failure ends the run and is returned to the caller.
pub struct Transfer {
    source: Arc<dyn RecordSource>,
    store: Arc<dyn IndexStore>,
    processor: Box<dyn RecordProcessor>,
    query: SourceQuery,
    mapping: Option<IndexMapping>,
    config: TransferConfig,
}

impl Transfer {
    /// Create a transfer with an explicit processor. Reads the whole
    /// collection and creates the index without a mapping unless overridden.
    pub fn new(
        source: Arc<dyn RecordSource>,
        store: Arc<dyn IndexStore>,
        processor: Box<dyn RecordProcessor>,
        config: TransferConfig,
    ) -> Self {
        Self {
            source,
            store,
            processor,
            query: SourceQuery::All,
            mapping: None,
            config,
        }
    }

    /// Copy every document of the collection as-is.
    pub fn generic(
        source: Arc<dyn RecordSource>,
        store: Arc<dyn IndexStore>,
        config: TransferConfig,
    ) -> Self {
        Self::new(source, store, Box::new(IdentityProcessor), config)
    }

    /// Build the person completion index: projected person records, shaped
    /// into weighted completion documents, in an index with a completion mapping.
    pub fn person(
        source: Arc<dyn RecordSource>,
        store: Arc<dyn IndexStore>,
        config: TransferConfig,
    ) -> Self {
        Self::new(source, store, Box::new(PersonProcessor::new()), config)
            .with_query(SourceQuery::Aggregate(person_pipeline()))
            .with_mapping(person_completion_mapping())
    }

    /// Read records with this query instead.
    pub fn with_query(mut self, query: SourceQuery) -> Self {
        self.query = query;
        self
    }

    /// Create the index with this mapping.
    pub fn with_mapping(mut self, mapping: IndexMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Reset and/or create the destination index.
    ///
    /// Existence is checked right before each delete or create. The checks are
    /// not atomic with the action that follows.
    pub async fn prepare_index(&self) -> Result<(), PipelineError> {
        let index = self.config.index_name.as_str();

        if self.config.reset_index
            && self
                .store
                .exists(index)
                .await
                .map_err(PipelineError::prepare)?
        {
            info!(index = %index, "Resetting index");
            self.store
                .delete(index)
                .await
                .map_err(PipelineError::prepare)?;
        }

        if !self
            .store
            .exists(index)
            .await
            .map_err(PipelineError::prepare)?
        {
            self.store
                .create(index, self.mapping.as_ref())
                .await
                .map_err(PipelineError::prepare)?;
        }

        Ok(())
    }

    /// Run the transfer to completion or to the first error.
    ///
    /// Documents flushed before an error remain in the index.
    #[instrument(skip(self), fields(index = %self.config.index_name))]
    pub async fn run(&self) -> Result<TransferSummary, PipelineError> {
        self.config.validate()?;
        self.prepare_index().await?;

        let index = self.config.index_name.as_str();
        let mut records = self.source.records(&self.query).await?;
        let mut loader = BulkLoader::with_config(self.store.clone(), &self.config);
        let mut skipped = 0;

        info!(
            batch_size = self.config.batch_size,
            timeout_secs = self.config.request_timeout.as_secs(),
            "Starting transfer"
        );

        while let Some(record) = records.next().await {
            let record = record?;

            let operation = match self.processor.process(index, &record) {
                Ok(operation) => operation,
                Err(e) if self.config.skip_malformed && e.is_malformed_record() => {
                    warn!(error = %e, "Skipping malformed record");
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            loader.push(operation).await?;
        }

        loader.flush().await?;

        let summary = TransferSummary {
            documents: loader.flushed_documents(),
            batches: loader.flushed_batches(),
            skipped,
        };

        info!(
            documents = summary.documents,
            batches = summary.batches,
            skipped = summary.skipped,
            "Inserted {} documents in total",
            summary.documents
        );

        Ok(summary)
    }
}
