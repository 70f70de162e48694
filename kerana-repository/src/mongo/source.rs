//! MongoDB record source.

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::AggregateOptions,
    Client, Collection,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::SourceError;
use crate::interfaces::{RecordSource, RecordStream, SourceQuery};
use kerana_shared::SourceRecord;

/// Reads records from one MongoDB collection.
pub struct MongoRecordSource {
    collection: Collection<Document>,
}

impl MongoRecordSource {
    /// Connect to MongoDB and select `database.collection`.
    ///
    /// # Arguments
    ///
    /// * `uri` - MongoDB connection string (e.g., "mongodb://localhost:27017/")
    /// * `database` - Database name
    /// * `collection` - Collection name
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| SourceError::connection(e.to_string()))?;

        info!(
            database = %database,
            collection = %collection,
            "Connected to MongoDB"
        );

        Ok(Self::from_client(&client, database, collection))
    }

    /// Use an existing client.
    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection::<Document>(collection),
        }
    }

    /// Convert JSON pipeline stages into BSON documents.
    fn to_bson_pipeline(stages: &[Value]) -> Result<Vec<Document>, SourceError> {
        stages
            .iter()
            .map(|stage| {
                bson::to_document(stage)
                    .map_err(|e| SourceError::query(format!("Invalid pipeline stage: {}", e)))
            })
            .collect()
    }
}

/// Convert a BSON document into a record using relaxed extended JSON.
///
/// Object ids become `{"$oid": "<hex>"}` and dates `{"$date": ...}`.
fn document_to_record(document: Document) -> Result<SourceRecord, SourceError> {
    SourceRecord::from_value(Bson::Document(document).into_relaxed_extjson())
        .ok_or_else(|| SourceError::decode("Document did not convert to a JSON object"))
}

#[async_trait]
impl RecordSource for MongoRecordSource {
    async fn records(&self, query: &SourceQuery) -> Result<RecordStream, SourceError> {
        let cursor = match query {
            SourceQuery::All => self.collection.find(doc! {}, None).await,
            SourceQuery::Aggregate(stages) => {
                let pipeline = Self::to_bson_pipeline(stages)?;
                let options = AggregateOptions::builder().allow_disk_use(true).build();
                self.collection.aggregate(pipeline, options).await
            }
        }
        .map_err(|e| SourceError::query(e.to_string()))?;

        debug!(
            collection = %self.collection.name(),
            aggregate = matches!(query, SourceQuery::Aggregate(_)),
            "Opened source cursor"
        );

        Ok(cursor
            .map(|item| {
                item.map_err(|e| SourceError::query(e.to_string()))
                    .and_then(document_to_record)
            })
            .boxed())
    }
}
