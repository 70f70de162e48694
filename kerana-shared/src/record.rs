//! Source records as read from the document store.

use serde_json::{Map, Value};

/// Name of the identifier field assigned by the source store.
pub const SOURCE_ID_FIELD: &str = "_id";

/// A raw record read from the source collection.
///
/// The record is read-only for the transfer: converting it into a bulk
/// operation copies the fields it needs and never mutates the record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceRecord {
    fields: Map<String, Value>,
}

impl SourceRecord {
    /// Wrap a field map read from the source.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// All fields, including the identifier.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The raw identifier value, if present.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(SOURCE_ID_FIELD)
    }

    /// The identifier in the string form used as the search document id.
    pub fn external_id(&self) -> Option<String> {
        self.id().map(stringify_id)
    }

    /// A copy of the fields without the identifier field.
    pub fn body(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(key, _)| key.as_str() != SOURCE_ID_FIELD)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Consume the record and return its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for SourceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Render a source identifier as a document id.
///
/// Strings are used verbatim. Single-key extended-JSON wrappers such as
/// `{"$oid": ..}`, `{"$date": ..}` or `{"$numberDecimal": ..}` collapse to
/// their wrapped value, so an object id becomes its hex string and a date its
/// ISO-8601 text. Everything else uses its compact JSON text.
pub fn stringify_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((key, inner)) if key.starts_with('$') => stringify_id(inner),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}
