//! Transfer configuration.

use std::time::Duration;

use kerana_repository::{BulkWriteOptions, DEFAULT_REQUEST_TIMEOUT};

use crate::errors::PipelineError;

/// Default batch size for a plain collection copy.
pub const DEFAULT_GENERIC_BATCH_SIZE: usize = 10;

/// Default batch size for the person completion index.
pub const DEFAULT_PERSON_BATCH_SIZE: usize = 100;

/// Settings for one transfer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Destination index name.
    pub index_name: String,
    /// Number of documents per bulk request.
    pub batch_size: usize,
    /// Delete the destination index before writing.
    pub reset_index: bool,
    /// Timeout applied to every bulk request.
    pub request_timeout: Duration,
    /// Log and skip records that cannot be shaped instead of stopping.
    pub skip_malformed: bool,
}

impl TransferConfig {
    /// Defaults for copying a collection as-is: batches of 10, index reset, 60 s timeout.
    pub fn generic(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            batch_size: DEFAULT_GENERIC_BATCH_SIZE,
            reset_index: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            skip_malformed: false,
        }
    }

    /// Defaults for the person completion index: batches of 100, index reset, 60 s timeout.
    pub fn person(index_name: impl Into<String>) -> Self {
        Self {
            batch_size: DEFAULT_PERSON_BATCH_SIZE,
            ..Self::generic(index_name)
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_reset_index(mut self, reset_index: bool) -> Self {
        self.reset_index = reset_index;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    /// Check the settings before any store is touched.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.index_name.trim().is_empty() {
            return Err(PipelineError::config("index name must not be empty"));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::config("batch size must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(PipelineError::config("request timeout must be positive"));
        }
        Ok(())
    }

    /// Options for every bulk request of this transfer: immediate refresh and
    /// the configured timeout.
    pub fn write_options(&self) -> BulkWriteOptions {
        BulkWriteOptions::with_timeout(self.request_timeout)
    }
}
