//! Opaque index mapping passed through on index creation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index creation body (settings and mappings).
///
/// The contents are not validated here; they are handed to the index store as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexMapping(Value);

impl IndexMapping {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for IndexMapping {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
