//! OpenSearch implementation of the index store.
//!
//! This module provides a concrete implementation of `IndexStore` using
//! OpenSearch (or a compatible Elasticsearch cluster) as the backend.

mod client;
mod index_config;

pub use client::OpenSearchIndexStore;
pub use index_config::{person_completion_mapping, COMPLETION_FIELD};
