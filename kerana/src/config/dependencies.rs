//! Dependency initialization and wiring for the Kerana loader.

use std::sync::Arc;
use tracing::info;

use super::Settings;
use crate::KeranaError;
use kerana_pipeline::{Transfer, TransferConfig};
use kerana_repository::{IndexStore, MongoRecordSource, OpenSearchIndexStore, RecordSource};

/// Container for the stores a transfer reads from and writes to.
pub struct Dependencies {
    /// The source collection.
    pub source: Arc<dyn RecordSource>,
    /// The destination search index store.
    pub store: Arc<dyn IndexStore>,
}

impl Dependencies {
    /// Connect to the source collection `database.collection` and the search index.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(KeranaError)` - If a client cannot be created
    pub async fn connect(
        settings: &Settings,
        database: &str,
        collection: &str,
    ) -> Result<Self, KeranaError> {
        info!(
            elasticsearch_url = %settings.elasticsearch_url,
            database = %database,
            collection = %collection,
            "Initializing dependencies"
        );

        let source = MongoRecordSource::connect(&settings.mongodb_uri, database, collection).await?;
        let store = OpenSearchIndexStore::new(&settings.elasticsearch_url, Some(settings.auth()))?;

        Ok(Self {
            source: Arc::new(source),
            store: Arc::new(store),
        })
    }

    /// Transfer that copies the collection as-is.
    pub fn generic_transfer(&self, config: TransferConfig) -> Transfer {
        Transfer::generic(self.source.clone(), self.store.clone(), config)
    }

    /// Transfer that builds the person completion index.
    pub fn person_transfer(&self, config: TransferConfig) -> Transfer {
        Transfer::person(self.source.clone(), self.store.clone(), config)
    }
}
