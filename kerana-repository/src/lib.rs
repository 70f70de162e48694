//! # Kerana Repository
//!
//! This crate provides the traits the transfer pipeline uses to talk to its
//! external stores, together with concrete implementations: an OpenSearch
//! (Elasticsearch-compatible) index store and a MongoDB record source.

pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod opensearch;
pub mod types;

pub use errors::{IndexStoreError, SourceError};
pub use interfaces::{IndexStore, RecordSource, RecordStream, SourceQuery};
pub use mongo::{person_pipeline, MongoRecordSource};
pub use opensearch::{person_completion_mapping, OpenSearchIndexStore};
pub use types::{BasicAuth, BulkWriteOptions, BulkWriteSummary, DEFAULT_REQUEST_TIMEOUT};
