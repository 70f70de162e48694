//! # Kerana Shared
//!
//! Plain data types shared by the Kerana crates: records read from the
//! source collection, the person specialization of those records, the bulk
//! operation descriptors submitted to the search index and the opaque index
//! mapping passed through on index creation.

mod bulk;
mod mapping;
mod person;
mod record;

pub use bulk::{BulkOperation, OperationKind};
pub use mapping::IndexMapping;
pub use person::{
    Affiliation, AffiliationType, CompletionField, PersonDocument, PersonRecord, UpdateEntry,
    ORGANIZATIONAL_UNIT_TYPES,
};
pub use record::{stringify_id, SourceRecord, SOURCE_ID_FIELD};
