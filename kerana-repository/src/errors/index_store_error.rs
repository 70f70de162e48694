//! Index store error types.
//!
//! This module defines the error types that can occur while preparing a
//! search index or writing documents into it.

use thiserror::Error;

/// Errors that can occur during index store operations.
#[derive(Debug, Clone, Error)]
pub enum IndexStoreError {
    /// Failed to build the client or reach the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Checking whether an index exists failed.
    #[error("Index lookup error: {0}")]
    IndexLookupError(String),

    /// Deleting an index failed.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Creating an index failed.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The bulk request itself failed (transport error, timeout, non-success status).
    #[error("Bulk write error: {0}")]
    BulkWriteError(String),

    /// The bulk request was accepted but some documents were rejected.
    #[error("Bulk write rejected {failed} of {total} documents: {reason}")]
    BulkItemsFailed {
        failed: usize,
        total: usize,
        reason: String,
    },

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IndexStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index lookup error.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::IndexLookupError(msg.into())
    }

    /// Create an index deletion error.
    pub fn deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create an index creation error.
    pub fn creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkWriteError(msg.into())
    }

    /// Create a bulk item failure error.
    pub fn items_failed(failed: usize, total: usize, reason: impl Into<String>) -> Self {
        Self::BulkItemsFailed {
            failed,
            total,
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
