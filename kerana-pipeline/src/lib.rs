//! # Kerana Pipeline
//!
//! This crate provides the pipeline components for copying records from a
//! MongoDB collection into a search index.
//!
//! ## Architecture
//!
//! The pipeline follows the Source-Processor-Loader pattern:
//!
//! 1. **Source**: Streams records from the collection cursor
//! 2. **Processor**: Turns each record into a bulk index operation
//! 3. **Loader**: Submits operations to the search index in batches
//! 4. **Orchestrator**: Prepares the index and coordinates the run

pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

#[cfg(test)]
mod testing;

pub use config::{TransferConfig, DEFAULT_GENERIC_BATCH_SIZE, DEFAULT_PERSON_BATCH_SIZE};
pub use errors::PipelineError;
pub use loader::BulkLoader;
pub use orchestrator::{Transfer, TransferSummary};
pub use processor::{IdentityProcessor, PersonProcessor, RecordProcessor};
