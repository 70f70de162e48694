//! Index store trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::IndexStoreError;
use crate::types::{BulkWriteOptions, BulkWriteSummary};
use kerana_shared::{BulkOperation, IndexMapping};

/// Abstracts the destination search index.
///
/// The transfer pipeline prepares the index with `exists`/`delete`/`create`
/// and then submits documents with `bulk_write`. Implementations are injected
/// into the pipeline, which makes it testable with mock stores.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index exists
    /// * `Ok(false)` - The index does not exist
    /// * `Err(IndexStoreError)` - If the check could not be performed
    async fn exists(&self, index: &str) -> Result<bool, IndexStoreError>;

    /// Delete an index and all of its documents.
    ///
    /// Deleting an index that does not exist is not an error.
    async fn delete(&self, index: &str) -> Result<(), IndexStoreError>;

    /// Create an index, optionally with settings and mappings.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `mapping` - Opaque creation body, passed through unvalidated
    async fn create(
        &self,
        index: &str,
        mapping: Option<&IndexMapping>,
    ) -> Result<(), IndexStoreError>;

    /// Submit a batch of operations as one bulk request.
    ///
    /// Any failure, including a single rejected document, is returned as an error.
    ///
    /// # Arguments
    ///
    /// * `operations` - The operations, submitted in order
    /// * `options` - Refresh and timeout settings for the request
    ///
    /// # Returns
    ///
    /// * `Ok(BulkWriteSummary)` - All operations were applied
    /// * `Err(IndexStoreError)` - The request failed or some operations were rejected
    async fn bulk_write(
        &self,
        operations: &[BulkOperation],
        options: &BulkWriteOptions,
    ) -> Result<BulkWriteSummary, IndexStoreError>;
}
