//! Record source trait definition.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::errors::SourceError;
use kerana_shared::SourceRecord;

/// A lazily produced, ordered sequence of records.
pub type RecordStream = BoxStream<'static, Result<SourceRecord, SourceError>>;

/// What to read from the source collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceQuery {
    /// Every document of the collection, unfiltered.
    All,
    /// An aggregation pipeline, one JSON object per stage.
    Aggregate(Vec<Value>),
}

/// Abstracts the source collection.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Open a cursor over the records matching `query`.
    ///
    /// Records are yielded in cursor order; the stream ends when the cursor
    /// is exhausted.
    async fn records(&self, query: &SourceQuery) -> Result<RecordStream, SourceError>;
}
