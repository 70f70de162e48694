//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `IndexStore` using the
//! OpenSearch Rust client. The index and bulk endpoints it calls are shared
//! with Elasticsearch, so the same store also writes to Elasticsearch clusters.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    params::Refresh,
    BulkParts, OpenSearch,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::IndexStoreError;
use crate::interfaces::IndexStore;
use crate::types::{BasicAuth, BulkWriteOptions, BulkWriteSummary};
use kerana_shared::{BulkOperation, IndexMapping};

/// OpenSearch index store.
///
/// # Example
///
/// ```ignore
/// use kerana_repository::{BasicAuth, OpenSearchIndexStore};
/// let store = OpenSearchIndexStore::new(
///     "http://localhost:9200",
///     Some(BasicAuth::new("elastic", "colav")),
/// )?;
///
/// if !store.exists("person").await? {
///     store.create("person", None).await?;
/// }
/// ```
pub struct OpenSearchIndexStore {
    client: OpenSearch,
}

impl OpenSearchIndexStore {
    /// Create a new store connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The server URL (e.g., "http://localhost:9200")
    /// * `auth` - Optional basic authentication credentials
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchIndexStore)` - A new store instance
    /// * `Err(IndexStoreError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str, auth: Option<BasicAuth>) -> Result<Self, IndexStoreError> {
        let parsed_url =
            Url::parse(url).map_err(|e| IndexStoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(auth) = &auth {
            builder = builder.auth(Credentials::Basic(
                auth.username.clone(),
                auth.password.clone(),
            ));
        }
        let transport = builder
            .build()
            .map_err(|e| IndexStoreError::connection(e.to_string()))?;

        info!(
            url = %url,
            authenticated = auth.is_some(),
            "Created OpenSearch index store"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Build the newline-delimited bulk body: an action line followed by the
    /// document source for every operation.
    fn bulk_body(operations: &[BulkOperation]) -> Vec<JsonBody<Value>> {
        let mut body = Vec::with_capacity(operations.len() * 2);
        for operation in operations {
            body.push(operation.action_line().into());
            body.push(Value::Object(operation.source().clone()).into());
        }
        body
    }

    /// Interpret a bulk response body.
    ///
    /// The request counts as failed when the engine reports `errors: true`;
    /// the first rejected item's reason is kept for the error message.
    fn parse_bulk_response(
        response: &Value,
        total: usize,
    ) -> Result<BulkWriteSummary, IndexStoreError> {
        let took_ms = response.get("took").and_then(Value::as_u64);

        if !response
            .get("errors")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Ok(BulkWriteSummary {
                indexed: total,
                took_ms,
            });
        }

        let failures: Vec<&Value> = response
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_object()?.values().next())
                    .filter(|result| result.get("error").is_some())
                    .collect()
            })
            .unwrap_or_default();

        let reason = failures
            .first()
            .map(|result| {
                let id = result.get("_id").and_then(Value::as_str).unwrap_or("?");
                let error = &result["error"];
                let detail = error
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                format!("document {}: {}", id, detail)
            })
            .unwrap_or_else(|| "bulk response reported errors".to_string());

        Err(IndexStoreError::items_failed(
            failures.len().max(1),
            total,
            reason,
        ))
    }
}

/// Render a timeout as a server-side time value, keeping sub-second precision.
fn server_timeout(timeout: Duration) -> String {
    format!("{}ms", timeout.as_millis())
}

#[async_trait]
impl IndexStore for OpenSearchIndexStore {
    async fn exists(&self, index: &str) -> Result<bool, IndexStoreError> {
        let indices = self.client.indices();
        let response = indices
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexStoreError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(IndexStoreError::lookup(format!(
                "Unexpected status {} checking index {}",
                status, index
            ))),
        }
    }

    async fn delete(&self, index: &str) -> Result<(), IndexStoreError> {
        let indices = self.client.indices();
        let response = indices
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexStoreError::deletion(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index may already be gone
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index delete request failed");
            return Err(IndexStoreError::deletion(format!(
                "Delete of {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, "Deleted index");
        Ok(())
    }

    async fn create(
        &self,
        index: &str,
        mapping: Option<&IndexMapping>,
    ) -> Result<(), IndexStoreError> {
        let indices = self.client.indices();
        let request = indices.create(IndicesCreateParts::Index(index));
        let response = match mapping {
            Some(mapping) => request.body(mapping.as_value().clone()).send().await,
            None => request.send().await,
        }
        .map_err(|e| IndexStoreError::creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index create request failed");
            return Err(IndexStoreError::creation(format!(
                "Create of {} failed with status {}: {}",
                index, status, error_body
            )));
        }

        info!(index = %index, with_mapping = mapping.is_some(), "Created index");
        Ok(())
    }

    #[instrument(skip(self, operations, options), fields(count = operations.len()))]
    async fn bulk_write(
        &self,
        operations: &[BulkOperation],
        options: &BulkWriteOptions,
    ) -> Result<BulkWriteSummary, IndexStoreError> {
        if operations.is_empty() {
            return Ok(BulkWriteSummary::default());
        }

        let refresh = if options.refresh {
            Refresh::True
        } else {
            Refresh::False
        };
        let timeout = server_timeout(options.timeout);

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(Self::bulk_body(operations))
            .refresh(refresh)
            .timeout(&timeout)
            .request_timeout(options.timeout)
            .send()
            .await
            .map_err(|e| IndexStoreError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(IndexStoreError::bulk(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexStoreError::parse(e.to_string()))?;

        let summary = Self::parse_bulk_response(&body, operations.len())?;
        debug!(indexed = summary.indexed, took_ms = ?summary.took_ms, "Bulk request applied");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn operation(id: &str, name: &str) -> BulkOperation {
        let mut source = Map::new();
        source.insert("name".to_string(), json!(name));
        BulkOperation::index("people", id, source)
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchIndexStore::new("not a url", None);
        assert!(matches!(result, Err(IndexStoreError::ConnectionError(_))));
    }

    #[test]
    fn test_new_with_auth() {
        let store = OpenSearchIndexStore::new(
            "http://localhost:9200",
            Some(BasicAuth::new("elastic", "colav")),
        );
        assert!(store.is_ok());
    }

    #[test]
    fn test_server_timeout_keeps_sub_second_precision() {
        assert_eq!(server_timeout(Duration::from_secs(60)), "60000ms");
        assert_eq!(server_timeout(Duration::from_millis(500)), "500ms");
        assert_eq!(server_timeout(Duration::from_millis(1500)), "1500ms");
    }

    #[tokio::test]
    async fn test_bulk_write_empty_sends_nothing() {
        let store = OpenSearchIndexStore::new("http://127.0.0.1:1", None).unwrap();

        let summary = store
            .bulk_write(&[], &BulkWriteOptions::default())
            .await
            .unwrap();

        assert_eq!(summary, BulkWriteSummary::default());
    }

    #[test]
    fn test_bulk_body_pairs_action_and_source() {
        let operations = vec![operation("1", "Ana"), operation("2", "Luis")];

        let body = OpenSearchIndexStore::bulk_body(&operations);

        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_parse_bulk_response_success() {
        let response = json!({
            "took": 12,
            "errors": false,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 200 } }
            ]
        });

        let summary = OpenSearchIndexStore::parse_bulk_response(&response, 2).unwrap();

        assert_eq!(summary.indexed, 2);
        assert_eq!(summary.took_ms, Some(12));
    }

    #[test]
    fn test_parse_bulk_response_item_errors() {
        let response = json!({
            "took": 3,
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": {
                    "_id": "2",
                    "status": 400,
                    "error": { "type": "mapper_parsing_exception", "reason": "failed to parse" }
                } }
            ]
        });

        let result = OpenSearchIndexStore::parse_bulk_response(&response, 2);

        match result {
            Err(IndexStoreError::BulkItemsFailed {
                failed,
                total,
                reason,
            }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
                assert!(reason.contains("document 2"));
                assert!(reason.contains("failed to parse"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_bulk_response_errors_without_items() {
        let response = json!({ "errors": true });

        let result = OpenSearchIndexStore::parse_bulk_response(&response, 5);

        assert!(matches!(
            result,
            Err(IndexStoreError::BulkItemsFailed {
                failed: 1,
                total: 5,
                ..
            })
        ));
    }
}
