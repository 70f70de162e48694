//! MongoDB implementation of the record source.
//!
//! This module provides `RecordSource` over a MongoDB collection and the
//! aggregation pipelines used to project records for indexing.

mod queries;
mod source;

pub use queries::person_pipeline;
pub use source::MongoRecordSource;
