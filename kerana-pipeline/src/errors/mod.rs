//! Error types for the Kerana pipeline.

use kerana_repository::{IndexStoreError, SourceError};
use thiserror::Error;

/// Errors that can occur while transferring records into the search index.
///
/// Every variant stops the transfer. Documents flushed before the error stay
/// in the index.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid transfer configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading from the source collection failed.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// A record is missing fields or has fields of the wrong shape.
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    /// Deleting, checking or creating the destination index failed.
    #[error("Index preparation error: {0}")]
    PrepareError(#[source] IndexStoreError),

    /// A bulk submission failed. `flushed` documents were written before it.
    #[error("Bulk flush failed after {flushed} documents: {error}")]
    FlushError {
        flushed: usize,
        #[source]
        error: IndexStoreError,
    },
}

impl PipelineError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an index preparation error.
    pub fn prepare(error: IndexStoreError) -> Self {
        Self::PrepareError(error)
    }

    /// Create a flush error.
    pub fn flush(flushed: usize, error: IndexStoreError) -> Self {
        Self::FlushError { flushed, error }
    }

    /// Whether this error was caused by a single bad record.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
