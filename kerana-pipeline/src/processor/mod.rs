//! Processor module for the Kerana pipeline.
//!
//! Turns raw source records into bulk operations. The generic path copies
//! the record as-is; the person path shapes it into a completion document.

mod identity_processor;
mod person_processor;

pub use identity_processor::IdentityProcessor;
pub use person_processor::{
    name_variants, organizational_affiliations, person_weight, shape_person, PersonProcessor,
};

use crate::errors::PipelineError;
use kerana_shared::{BulkOperation, SourceRecord};

/// Converts one source record into one bulk operation for `index`.
pub trait RecordProcessor: Send + Sync {
    fn process(&self, index: &str, record: &SourceRecord) -> Result<BulkOperation, PipelineError>;
}

/// Identifier used in errors for records without one.
pub(crate) fn record_label(record: &SourceRecord) -> String {
    record
        .external_id()
        .unwrap_or_else(|| "<missing _id>".to_string())
}
