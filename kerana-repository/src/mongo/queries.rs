//! MongoDB aggregation pipeline builders.
//!
//! Stages are built as JSON and converted to BSON by the record source, so
//! callers can treat a pipeline as plain configuration data.

use serde_json::{json, Value};

use kerana_shared::ORGANIZATIONAL_UNIT_TYPES;

/// Build the pipeline that projects person records for the completion index.
///
/// The projection keeps the name fields, provenance entries and product count,
/// and reduces `affiliations` to the entries that have at least one type in
/// the organizational unit vocabulary (`group`, `department`, `faculty`).
/// Affiliations with a missing `types` list are treated as having none.
pub fn person_pipeline() -> Vec<Value> {
    vec![json!({
        "$project": {
            "full_name": 1,
            "first_names": 1,
            "last_names": 1,
            "updated": 1,
            "products_count": 1,
            "affiliations": {
                "$filter": {
                    "input": "$affiliations",
                    "as": "affiliation",
                    "cond": {
                        "$gt": [
                            {
                                "$size": {
                                    "$filter": {
                                        "input": { "$ifNull": ["$$affiliation.types", []] },
                                        "as": "type",
                                        "cond": {
                                            "$in": ["$$type.type", ORGANIZATIONAL_UNIT_TYPES]
                                        }
                                    }
                                }
                            },
                            0
                        ]
                    }
                }
            }
        }
    })]
}
