//! Record source error types.

use thiserror::Error;

/// Errors that can occur while reading records from the source store.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    /// Failed to establish connection to the source store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The query or cursor failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A returned document could not be converted into a record.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}
