//! Person processor implementation.
//!
//! Shapes person records into completion documents: a ranking weight derived
//! from provenance and affiliations, plus the set of name variants that seed
//! the completion suggester.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use super::{record_label, RecordProcessor};
use crate::errors::PipelineError;
use kerana_shared::{
    Affiliation, BulkOperation, CompletionField, PersonDocument, PersonRecord, SourceRecord,
    UpdateEntry, ORGANIZATIONAL_UNIT_TYPES,
};

/// Provenance source with the highest priority.
const STAFF_SOURCE: &str = "staff";

/// Provenance sources from the national science registries.
const REGISTRY_SOURCES: [&str; 2] = ["scienti", "minciencias"];

const STAFF_WEIGHT: u32 = 10;
const REGISTRY_AFFILIATED_WEIGHT: u32 = 6;
const REGISTRY_WEIGHT: u32 = 4;
const AFFILIATED_WEIGHT: u32 = 2;
const BASE_WEIGHT: u32 = 0;

/// Compute the completion weight of a person.
///
/// | provenance                      | affiliations | weight |
/// |---------------------------------|--------------|--------|
/// | `staff`                         | any          | 10     |
/// | `scienti` or `minciencias`      | non-empty    | 6      |
/// | `scienti` or `minciencias`      | empty        | 4      |
/// | other                           | non-empty    | 2      |
/// | other                           | empty        | 0      |
///
/// Only the presence of a source matters, not how often or in which order it appears.
pub fn person_weight(updated: &[UpdateEntry], affiliations: &[Affiliation]) -> u32 {
    let affiliated = !affiliations.is_empty();

    if updated_by_any(updated, &[STAFF_SOURCE]) {
        STAFF_WEIGHT
    } else if updated_by_any(updated, &REGISTRY_SOURCES) {
        if affiliated {
            REGISTRY_AFFILIATED_WEIGHT
        } else {
            REGISTRY_WEIGHT
        }
    } else if affiliated {
        AFFILIATED_WEIGHT
    } else {
        BASE_WEIGHT
    }
}

fn updated_by_any(updated: &[UpdateEntry], sources: &[&str]) -> bool {
    updated
        .iter()
        .any(|entry| sources.contains(&entry.source.as_str()))
}

/// Build the deduplicated set of full-name variants of a person.
///
/// The set holds:
/// - `full_name` as stored;
/// - every first name followed by all last names;
/// - all last names on their own, when there is at least one;
/// - `"<last0> <first0>"` and `"<first0> <last0>"` when both lists are non-empty.
///
/// Variants are returned sorted; only membership is meaningful.
pub fn name_variants(person: &PersonRecord) -> Vec<String> {
    let last_names = person.last_names.join(" ");
    let mut names = BTreeSet::new();

    names.insert(person.full_name.clone());
    for first_name in &person.first_names {
        names.insert(format!("{} {}", first_name, last_names));
    }
    if !last_names.is_empty() {
        names.insert(last_names.clone());
    }
    if let (Some(first), Some(last)) = (person.first_names.first(), person.last_names.first()) {
        names.insert(format!("{} {}", last, first));
        names.insert(format!("{} {}", first, last));
    }

    names.into_iter().collect()
}

/// Keep only affiliations tagged with at least one organizational unit type
/// (`group`, `department` or `faculty`).
pub fn organizational_affiliations(affiliations: Vec<Affiliation>) -> Vec<Affiliation> {
    affiliations
        .into_iter()
        .filter(|affiliation| affiliation.has_any_type(&ORGANIZATIONAL_UNIT_TYPES))
        .collect()
}

/// Shape a person into a bulk operation for `index`.
pub fn shape_person(index: &str, person: PersonRecord) -> Result<BulkOperation, PipelineError> {
    let id = kerana_shared::stringify_id(&person.id);
    let weight = person_weight(&person.updated, &person.affiliations);
    let input = name_variants(&person);

    let document = PersonDocument {
        full_name: CompletionField { input, weight },
        affiliations: person.affiliations,
        products_count: person.products_count,
    };

    match serde_json::to_value(&document) {
        Ok(Value::Object(body)) => Ok(BulkOperation::index(index, id, body)),
        Ok(_) => Err(PipelineError::malformed(id, "document did not serialize to an object")),
        Err(e) => Err(PipelineError::malformed(id, e.to_string())),
    }
}

/// Processor for the person completion index.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonProcessor {
    filter_affiliations: bool,
}

impl PersonProcessor {
    /// Processor for records whose affiliations were already filtered by the source query.
    pub fn new() -> Self {
        Self {
            filter_affiliations: false,
        }
    }

    /// Processor that applies the organizational unit filter itself, for
    /// sources that return unfiltered affiliations.
    pub fn filtering_affiliations() -> Self {
        Self {
            filter_affiliations: true,
        }
    }
}

impl RecordProcessor for PersonProcessor {
    fn process(&self, index: &str, record: &SourceRecord) -> Result<BulkOperation, PipelineError> {
        let mut person = PersonRecord::from_record(record)
            .map_err(|e| PipelineError::malformed(record_label(record), e.to_string()))?;

        if self.filter_affiliations {
            person.affiliations = organizational_affiliations(person.affiliations);
        }

        let operation = shape_person(index, person)?;
        debug!(id = %operation.document_id(), "Shaped person document");
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn updated(sources: &[&str]) -> Vec<UpdateEntry> {
        sources
            .iter()
            .map(|source| serde_json::from_value(json!({ "source": source, "time": 1 })).unwrap())
            .collect()
    }

    fn affiliation(types: &[&str]) -> Affiliation {
        let types: Vec<Value> = types.iter().map(|t| json!({ "type": t })).collect();
        serde_json::from_value(json!({ "id": "a", "types": types })).unwrap()
    }

    fn person(first_names: &[&str], last_names: &[&str]) -> PersonRecord {
        serde_json::from_value(json!({
            "_id": "p1",
            "full_name": "Full Name",
            "first_names": first_names,
            "last_names": last_names,
            "updated": [],
        }))
        .unwrap()
    }

    #[test]
    fn test_weight_staff_wins_regardless_of_affiliations() {
        assert_eq!(person_weight(&updated(&["staff"]), &[]), 10);
        assert_eq!(person_weight(&updated(&["staff"]), &[affiliation(&["group"])]), 10);
        assert_eq!(
            person_weight(&updated(&["openalex", "scienti", "staff"]), &[]),
            10
        );
    }

    #[test]
    fn test_weight_registry_sources() {
        for source in ["scienti", "minciencias"] {
            assert_eq!(
                person_weight(&updated(&[source]), &[affiliation(&["faculty"])]),
                6
            );
            assert_eq!(person_weight(&updated(&[source]), &[]), 4);
        }
        assert_eq!(
            person_weight(&updated(&["scienti", "scienti", "minciencias"]), &[]),
            4
        );
    }

    #[test]
    fn test_weight_other_sources() {
        assert_eq!(
            person_weight(&updated(&["openalex"]), &[affiliation(&["group"])]),
            2
        );
        assert_eq!(person_weight(&updated(&["openalex"]), &[]), 0);
        assert_eq!(person_weight(&[], &[]), 0);
    }

    #[test]
    fn test_weight_ignores_order() {
        let a = person_weight(&updated(&["openalex", "minciencias"]), &[]);
        let b = person_weight(&updated(&["minciencias", "openalex"]), &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_name_variants_example() {
        let mut p = person(&["Ana"], &["Gomez", "Ruiz"]);
        p.full_name = "Ana Gomez Ruiz".to_string();

        let variants = name_variants(&p);

        for expected in ["Ana Gomez Ruiz", "Gomez Ruiz", "Gomez Ana", "Ana Gomez"] {
            assert!(variants.contains(&expected.to_string()), "missing {}", expected);
        }
        // "Ana Gomez Ruiz" comes from both full_name and first+last but appears once.
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn test_name_variants_always_contain_full_name() {
        let p = person(&["Maria", "Jose"], &["Perez"]);
        let variants = name_variants(&p);

        assert!(variants.contains(&"Full Name".to_string()));
        assert!(variants.contains(&"Maria Perez".to_string()));
        assert!(variants.contains(&"Jose Perez".to_string()));
        assert!(variants.contains(&"Perez".to_string()));
        assert!(variants.contains(&"Perez Maria".to_string()));
    }

    #[test]
    fn test_name_variants_empty_lists() {
        let p = person(&[], &[]);
        assert_eq!(name_variants(&p), vec!["Full Name".to_string()]);
    }

    #[test]
    fn test_name_variants_without_last_names() {
        let p = person(&["Ana"], &[]);
        let variants = name_variants(&p);

        assert_eq!(variants, vec!["Ana ".to_string(), "Full Name".to_string()]);
    }

    #[test]
    fn test_name_variants_without_first_names() {
        let p = person(&[], &["Gomez", "Ruiz"]);
        let variants = name_variants(&p);

        assert_eq!(
            variants,
            vec!["Full Name".to_string(), "Gomez Ruiz".to_string()]
        );
    }

    #[test]
    fn test_organizational_affiliations() {
        let kept = organizational_affiliations(vec![
            affiliation(&["group"]),
            affiliation(&["Education"]),
            affiliation(&["Education", "department"]),
            affiliation(&[]),
        ]);

        assert_eq!(kept.len(), 2);
        assert!(kept[0].has_any_type(&["group"]));
        assert!(kept[1].has_any_type(&["department"]));
    }

    #[test]
    fn test_shape_person_document() {
        let record = SourceRecord::from_value(json!({
            "_id": { "$oid": "65a1f0c2e4b0a1b2c3d4e5f6" },
            "full_name": "Ana Gomez Ruiz",
            "first_names": ["Ana"],
            "last_names": ["Gomez", "Ruiz"],
            "updated": [{ "source": "scienti", "time": 1 }],
            "affiliations": [{ "id": "g1", "types": [{ "type": "group" }] }],
            "products_count": 7
        }))
        .unwrap();

        let operation = PersonProcessor::new().process("person", &record).unwrap();

        assert_eq!(operation.target_index(), "person");
        assert_eq!(operation.document_id(), "65a1f0c2e4b0a1b2c3d4e5f6");

        let body = operation.source();
        assert!(!body.contains_key("_id"));
        assert_eq!(body["full_name"]["weight"], 6);
        assert_eq!(body["full_name"]["input"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["affiliations"],
            json!([{ "id": "g1", "types": [{ "type": "group" }] }])
        );
        assert_eq!(body["products_count"], 7);
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_shape_person_defaults() {
        let record = SourceRecord::from_value(json!({
            "_id": "p2",
            "full_name": "Luis",
            "first_names": [],
            "last_names": [],
            "updated": []
        }))
        .unwrap();

        let operation = PersonProcessor::new().process("person", &record).unwrap();
        let body = operation.source();

        assert_eq!(body["full_name"], json!({ "input": ["Luis"], "weight": 0 }));
        assert_eq!(body["affiliations"], json!([]));
        assert!(body["products_count"].is_null());
    }

    #[test]
    fn test_filtering_processor_drops_non_organizational_affiliations() {
        let record = SourceRecord::from_value(json!({
            "_id": "p3",
            "full_name": "Luis",
            "first_names": ["Luis"],
            "last_names": [],
            "updated": [{ "source": "minciencias" }],
            "affiliations": [{ "id": "u1", "types": [{ "type": "Education" }] }]
        }))
        .unwrap();

        let unfiltered = PersonProcessor::new().process("person", &record).unwrap();
        let filtered = PersonProcessor::filtering_affiliations()
            .process("person", &record)
            .unwrap();

        assert_eq!(unfiltered.source()["full_name"]["weight"], 6);
        assert_eq!(filtered.source()["full_name"]["weight"], 4);
        assert_eq!(filtered.source()["affiliations"], json!([]));
    }

    #[test]
    fn test_affiliation_type_without_string_kind_is_indexed() {
        let record = SourceRecord::from_value(json!({
            "_id": "p1",
            "full_name": "Ana Gomez",
            "first_names": ["Ana"],
            "last_names": ["Gomez"],
            "updated": [{ "source": "staff" }],
            "affiliations": [{
                "id": "g1",
                "types": [{ "type": "group" }, { "source": "ror", "type": null }]
            }, {
                "id": "u1",
                "types": [{ "source": "ror" }]
            }]
        }))
        .unwrap();

        let operation = PersonProcessor::new().process("person", &record).unwrap();
        let filtered = PersonProcessor::filtering_affiliations()
            .process("person", &record)
            .unwrap();

        assert_eq!(operation.document_id(), "p1");
        assert_eq!(operation.source()["full_name"]["weight"], 10);
        assert_eq!(
            operation.source()["affiliations"][0]["types"][1],
            json!({ "source": "ror", "type": null })
        );
        assert_eq!(
            filtered.source()["affiliations"],
            json!([{
                "id": "g1",
                "types": [{ "type": "group" }, { "source": "ror", "type": null }]
            }])
        );
    }

    #[test]
    fn test_malformed_person_fails() {
        let record = SourceRecord::from_value(json!({
            "_id": "p4",
            "full_name": "No lists"
        }))
        .unwrap();

        let result = PersonProcessor::new().process("person", &record);

        match result {
            Err(PipelineError::MalformedRecord { id, .. }) => assert_eq!(id, "p4"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
