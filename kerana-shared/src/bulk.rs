//! Bulk operation descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The kind of bulk action. Only whole-document indexing is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Create or replace the document with the given id.
    Index,
}

impl OperationKind {
    /// The action name used in a bulk request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Index => "index",
        }
    }
}

/// One unit of a bulk write request: the action, its target and the document body.
///
/// Descriptors are built once per source record and not modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    kind: OperationKind,
    index: String,
    id: String,
    source: Map<String, Value>,
}

impl BulkOperation {
    /// Build an index (upsert-by-id) operation.
    pub fn index(
        index: impl Into<String>,
        id: impl Into<String>,
        source: Map<String, Value>,
    ) -> Self {
        Self {
            kind: OperationKind::Index,
            index: index.into(),
            id: id.into(),
            source,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Target index name.
    pub fn target_index(&self) -> &str {
        &self.index
    }

    /// Search document id.
    pub fn document_id(&self) -> &str {
        &self.id
    }

    /// Document body.
    pub fn source(&self) -> &Map<String, Value> {
        &self.source
    }

    /// The action line preceding the body in a bulk request.
    pub fn action_line(&self) -> Value {
        let mut action = Map::new();
        action.insert(
            self.kind.as_str().to_string(),
            json!({ "_index": self.index, "_id": self.id }),
        );
        Value::Object(action)
    }
}
