//! In-memory stores for pipeline tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use kerana_repository::{
    BulkWriteOptions, BulkWriteSummary, IndexStore, IndexStoreError, RecordSource, RecordStream,
    SourceError, SourceQuery,
};
use kerana_shared::{BulkOperation, IndexMapping, SourceRecord};

#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryIndex {
    pub mapping: Option<IndexMapping>,
    pub documents: BTreeMap<String, Map<String, Value>>,
}

/// Index store that keeps indices in memory and records every call.
pub(crate) struct MemoryIndexStore {
    indices: Mutex<BTreeMap<String, MemoryIndex>>,
    calls: Mutex<Vec<String>>,
    batches: Mutex<Vec<Vec<String>>>,
    last_options: Mutex<Option<BulkWriteOptions>>,
    bulk_calls: AtomicUsize,
    fail_on_call: Option<usize>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self {
            indices: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
            bulk_calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    /// A store whose `n`-th bulk call (1-based) fails with a transport error.
    pub fn failing_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::new()
        }
    }

    /// Seed an existing index holding one stale document.
    pub async fn seed_index(&self, index: &str, stale_id: &str) {
        let mut state = MemoryIndex::default();
        state.documents.insert(stale_id.to_string(), Map::new());
        self.indices.lock().await.insert(index.to_string(), state);
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().await.iter().map(Vec::len).collect()
    }

    /// Document ids in the order they were written.
    pub async fn written_ids(&self) -> Vec<String> {
        self.batches.lock().await.concat()
    }

    pub async fn last_options(&self) -> Option<BulkWriteOptions> {
        self.last_options.lock().await.clone()
    }

    pub async fn index(&self, index: &str) -> Option<MemoryIndex> {
        self.indices.lock().await.get(index).cloned()
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn exists(&self, index: &str) -> Result<bool, IndexStoreError> {
        self.calls.lock().await.push(format!("exists:{}", index));
        Ok(self.indices.lock().await.contains_key(index))
    }

    async fn delete(&self, index: &str) -> Result<(), IndexStoreError> {
        self.calls.lock().await.push(format!("delete:{}", index));
        self.indices.lock().await.remove(index);
        Ok(())
    }

    async fn create(
        &self,
        index: &str,
        mapping: Option<&IndexMapping>,
    ) -> Result<(), IndexStoreError> {
        self.calls.lock().await.push(format!("create:{}", index));
        let mut indices = self.indices.lock().await;
        if indices.contains_key(index) {
            return Err(IndexStoreError::creation(format!("{} already exists", index)));
        }
        indices.insert(
            index.to_string(),
            MemoryIndex {
                mapping: mapping.cloned(),
                documents: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn bulk_write(
        &self,
        operations: &[BulkOperation],
        options: &BulkWriteOptions,
    ) -> Result<BulkWriteSummary, IndexStoreError> {
        let call = self.bulk_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_options.lock().await = Some(options.clone());

        if self.fail_on_call == Some(call) {
            return Err(IndexStoreError::bulk("connection reset by peer"));
        }

        let mut indices = self.indices.lock().await;
        for operation in operations {
            indices
                .entry(operation.target_index().to_string())
                .or_default()
                .documents
                .insert(
                    operation.document_id().to_string(),
                    operation.source().clone(),
                );
        }

        self.batches.lock().await.push(
            operations
                .iter()
                .map(|operation| operation.document_id().to_string())
                .collect(),
        );

        Ok(BulkWriteSummary {
            indexed: operations.len(),
            took_ms: Some(1),
        })
    }
}

/// Record source backed by a list of JSON values.
pub(crate) struct VecRecordSource {
    records: Vec<Value>,
    queries: Mutex<Vec<SourceQuery>>,
}

impl VecRecordSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub async fn queries(&self) -> Vec<SourceQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl RecordSource for VecRecordSource {
    async fn records(&self, query: &SourceQuery) -> Result<RecordStream, SourceError> {
        self.queries.lock().await.push(query.clone());

        let records: Vec<Result<SourceRecord, SourceError>> = self
            .records
            .iter()
            .cloned()
            .map(|value| {
                SourceRecord::from_value(value)
                    .ok_or_else(|| SourceError::decode("record is not an object"))
            })
            .collect();

        Ok(stream::iter(records).boxed())
    }
}
