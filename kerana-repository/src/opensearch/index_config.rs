//! Index mappings used when creating destination indices.

use kerana_shared::IndexMapping;
use serde_json::json;

/// The field of a person document backing the completion suggester.
pub const COMPLETION_FIELD: &str = "full_name";

/// Mapping for the person autocomplete index.
///
/// Declares `full_name` as a `completion` field so its `input` variants and
/// `weight` feed the completion suggester. All other fields are mapped
/// dynamically.
pub fn person_completion_mapping() -> IndexMapping {
    IndexMapping::new(json!({
        "mappings": {
            "properties": {
                "full_name": {
                    "type": "completion"
                }
            }
        }
    }))
}
