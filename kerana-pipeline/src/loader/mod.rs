//! Loader module for the Kerana pipeline.
//!
//! Accumulates bulk operations into fixed-size batches and submits each batch
//! to the index store.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::TransferConfig;
use crate::errors::PipelineError;
use kerana_repository::{BulkWriteOptions, IndexStore};
use kerana_shared::BulkOperation;

/// Loader that writes operations into the search index in batches.
///
/// The loader is responsible for:
/// - Buffering operations in source order
/// - Flushing a batch as soon as it reaches `batch_size`
/// - Stopping at the first failed flush
///
/// Batches are submitted one at a time; a batch is never reordered or retried.
pub struct BulkLoader {
    store: Arc<dyn IndexStore>,
    batch_size: usize,
    options: BulkWriteOptions,
    pending: Vec<BulkOperation>,
    flushed_documents: usize,
    flushed_batches: usize,
}

impl BulkLoader {
    /// Create a loader with an explicit batch size and request options.
    pub fn new(store: Arc<dyn IndexStore>, batch_size: usize, options: BulkWriteOptions) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            store,
            batch_size,
            options,
            pending: Vec::with_capacity(batch_size),
            flushed_documents: 0,
            flushed_batches: 0,
        }
    }

    /// Create a loader from a transfer configuration.
    pub fn with_config(store: Arc<dyn IndexStore>, config: &TransferConfig) -> Self {
        Self::new(store, config.batch_size, config.write_options())
    }

    /// Queue one operation, flushing when the batch is full.
    pub async fn push(&mut self, operation: BulkOperation) -> Result<(), PipelineError> {
        self.pending.push(operation);

        if self.pending.len() >= self.batch_size {
            self.flush().await?;
        }

        Ok(())
    }

    /// Submit all pending operations as one bulk request.
    ///
    /// Does nothing when there is nothing pending. On failure the error
    /// carries the number of documents flushed by earlier batches.
    #[instrument(skip(self), fields(pending = self.pending.len()))]
    pub async fn flush(&mut self) -> Result<(), PipelineError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let batch: Vec<BulkOperation> = self.pending.drain(..).collect();
        let count = batch.len();

        debug!(count = count, "Flushing batch to search index");

        match self.store.bulk_write(&batch, &self.options).await {
            Ok(summary) => {
                self.flushed_documents += count;
                self.flushed_batches += 1;
                info!(
                    batch = self.flushed_batches,
                    documents = self.flushed_documents,
                    took_ms = ?summary.took_ms,
                    "Inserted {} documents...",
                    self.flushed_documents
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    count = count,
                    flushed = self.flushed_documents,
                    "Failed to index batch"
                );
                Err(PipelineError::flush(self.flushed_documents, e))
            }
        }
    }

    /// Number of documents written by successful flushes.
    pub fn flushed_documents(&self) -> usize {
        self.flushed_documents
    }

    /// Number of successful flushes.
    pub fn flushed_batches(&self) -> usize {
        self.flushed_batches
    }

    /// Number of operations waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
