//! Interface definitions for the external stores.
//!
//! `IndexStore` abstracts the destination search index and `RecordSource`
//! the source collection, so the transfer pipeline can run against
//! OpenSearch/MongoDB in production and in-memory mocks in tests.

mod index_store;
mod record_source;

pub use index_store::IndexStore;
pub use record_source::{RecordSource, RecordStream, SourceQuery};
