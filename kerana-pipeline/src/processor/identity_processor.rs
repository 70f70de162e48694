//! Pass-through processor for plain collection copies.

use kerana_shared::{BulkOperation, SourceRecord, SOURCE_ID_FIELD};

use super::RecordProcessor;
use crate::errors::PipelineError;

/// Indexes every record as-is under its stringified `_id`.
///
/// The identifier is not repeated in the document body. The record itself
/// is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProcessor;

impl RecordProcessor for IdentityProcessor {
    fn process(&self, index: &str, record: &SourceRecord) -> Result<BulkOperation, PipelineError> {
        let id = record.external_id().ok_or_else(|| {
            PipelineError::malformed("<missing _id>", format!("no {} field", SOURCE_ID_FIELD))
        })?;

        Ok(BulkOperation::index(index, id, record.body()))
    }
}
