//! Error types for the Kerana repository.

mod index_store_error;
mod source_error;

pub use index_store_error::IndexStoreError;
pub use source_error::SourceError;
