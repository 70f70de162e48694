//! Person records and the completion document built from them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::record::SourceRecord;

/// Affiliation types that mark an organizational unit.
pub const ORGANIZATIONAL_UNIT_TYPES: [&str; 3] = ["group", "department", "faculty"];

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A provenance entry: which system last touched the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One type tag of an affiliation (`group`, `department`, `faculty`, ...).
///
/// Entries are carried through as read. An entry without a string `type`
/// is kept but never matches a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffiliationType(Value);

impl AffiliationType {
    pub fn new(entry: Value) -> Self {
        Self(entry)
    }

    /// The `type` tag, when it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// An affiliation of a person. Fields other than `types` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<AffiliationType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Affiliation {
    /// Whether any of this affiliation's type tags is in `kinds`.
    pub fn has_any_type(&self, kinds: &[&str]) -> bool {
        self.types
            .iter()
            .filter_map(AffiliationType::kind)
            .any(|kind| kinds.contains(&kind))
    }
}

/// A person as projected from the source collection.
///
/// `full_name`, `first_names`, `last_names` and `updated` are required;
/// a record missing any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "_id")]
    pub id: Value,
    pub full_name: String,
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub updated: Vec<UpdateEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<Affiliation>,
    #[serde(default)]
    pub products_count: Option<Value>,
}

impl PersonRecord {
    /// Read a person out of a raw source record.
    pub fn from_record(record: &SourceRecord) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.fields().clone()))
    }
}

/// A completion-suggester field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionField {
    pub input: Vec<String>,
    pub weight: u32,
}

/// The indexed body of a person document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDocument {
    pub full_name: CompletionField,
    pub affiliations: Vec<Affiliation>,
    pub products_count: Option<Value>,
}
