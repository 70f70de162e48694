//! Request and response types for index store operations.

use std::time::Duration;

/// Default request timeout for bulk writes.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Options applied to a single bulk write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkWriteOptions {
    /// Make the written documents visible to search before the request returns.
    pub refresh: bool,
    /// Maximum time to wait for the request.
    pub timeout: Duration,
}

impl Default for BulkWriteOptions {
    fn default() -> Self {
        Self {
            refresh: true,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl BulkWriteOptions {
    /// Immediate refresh with the given timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            refresh: true,
            timeout,
        }
    }
}

/// Outcome of a successful bulk write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkWriteSummary {
    /// Number of documents written.
    pub indexed: usize,
    /// Server-side processing time, when reported.
    pub took_ms: Option<u64>,
}

/// HTTP basic authentication credentials for the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
