use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::PineconeConfig;
use crate::error::{MemoryError, MemoryResult};
use crate::models::{MemoryRecord, QueryMatch, QueryRequest};
use crate::repository::MemoryIndex;

const API_VERSION: &str = "2025-01";

/// Pinecone-backed implementation of MemoryIndex over the REST data plane
pub struct PineconeIndex {
    client: Client,
    host: String,
}

impl PineconeIndex {
    /// Builds the client and resolves the index host.
    ///
    /// When no host is configured it is looked up once from the control plane.
    pub async fn connect(config: PineconeConfig) -> MemoryResult<Self> {
        let client = Self::build_client(&config)?;

        let host = match config.index_host.as_deref() {
            Some(host) => normalize_host(host),
            None => Self::describe_index(&client, &config).await?,
        };

        info!(index = %config.index_name, host = %host, "Pinecone index ready");
        Ok(Self { client, host })
    }

    /// Data plane base URL
    pub fn host(&self) -> &str {
        &self.host
    }

    fn build_client(config: &PineconeConfig) -> MemoryResult<Client> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| MemoryError::Config("PINECONE_API_KEY is not a valid header".to_string()))?;
        api_key.set_sensitive(true);
        headers.insert("Api-Key", api_key);
        headers.insert("X-Pinecone-API-Version", HeaderValue::from_static(API_VERSION));

        Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MemoryError::Config(format!("Failed to build Pinecone client: {}", e)))
    }

    async fn describe_index(client: &Client, config: &PineconeConfig) -> MemoryResult<String> {
        let url = format!(
            "{}/indexes/{}",
            config.controller_url.trim_end_matches('/'),
            config.index_name
        );
        debug!(url = %url, "Resolving Pinecone index host");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| MemoryError::Config(format!("Failed to describe index: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MemoryError::Config(format!(
                "Pinecone describe index error ({}): {}",
                status, error_text
            )));
        }

        let description: IndexDescription = response
            .json()
            .await
            .map_err(|e| MemoryError::Config(format!("Malformed index description: {}", e)))?;

        Ok(normalize_host(&description.host))
    }
}

/// Prefixes `https://` unless the host already carries a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: [&'a MemoryRecord; 1],
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: u32,
    include_values: bool,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[async_trait]
impl MemoryIndex for PineconeIndex {
    async fn upsert(&self, namespace: &str, record: MemoryRecord) -> MemoryResult<()> {
        let body = UpsertRequest {
            vectors: [&record],
            namespace,
        };

        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.host))
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Storage(format!("Pinecone request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MemoryError::Storage(format!(
                "Pinecone upsert error ({}): {}",
                status, error_text
            )));
        }

        Ok(())
    }

    async fn query(&self, namespace: &str, request: QueryRequest) -> MemoryResult<Vec<QueryMatch>> {
        let body = QueryBody {
            namespace,
            vector: &request.vector,
            top_k: request.top_k,
            include_values: request.include_values,
            include_metadata: request.include_metadata,
        };

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Retrieval(format!("Pinecone request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MemoryError::Retrieval(format!(
                "Pinecone query error ({}): {}",
                status, error_text
            )));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| MemoryError::Retrieval(format!("Malformed Pinecone response: {}", e)))?;

        Ok(query_response.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    async fn index_for(server: &mockito::ServerGuard) -> PineconeIndex {
        let config = PineconeConfig::new("pc-test".to_string(), "memories".to_string())
            .with_index_host(server.url());
        PineconeIndex::connect(config).await.unwrap()
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("memories-abc.svc.pinecone.io"),
            "https://memories-abc.svc.pinecone.io"
        );
        assert_eq!(normalize_host("http://localhost:5080/"), "http://localhost:5080");
    }

    #[tokio::test]
    async fn test_upsert_sends_record_and_namespace() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/vectors/upsert")
            .match_header("api-key", "pc-test")
            .match_header("x-pinecone-api-version", API_VERSION)
            .match_body(Matcher::Json(json!({
                "vectors": [{ "id": "m-1", "values": [0.5, 0.25], "metadata": { "text": "hello" } }],
                "namespace": "default"
            })))
            .with_status(200)
            .with_body(r#"{"upsertedCount":1}"#)
            .create_async()
            .await;

        let index = index_for(&server).await;
        let record = MemoryRecord::new("m-1".to_string(), vec![0.5, 0.25], "hello".to_string());
        index.upsert("default", record).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upsert_maps_error_status_to_storage() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/vectors/upsert")
            .with_status(400)
            .with_body(r#"{"code":3,"message":"Vector dimension 2 does not match"}"#)
            .create_async()
            .await;

        let index = index_for(&server).await;
        let record = MemoryRecord::new("m-1".to_string(), vec![0.5, 0.25], "hello".to_string());
        let err = index.upsert("default", record).await.unwrap_err();

        assert!(matches!(err, MemoryError::Storage(msg) if msg.contains("400")));
    }

    #[tokio::test]
    async fn test_query_sends_top_k_and_preserves_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_header("api-key", "pc-test")
            .match_body(Matcher::Json(json!({
                "namespace": "chat",
                "vector": [1.0, 0.0],
                "topK": 5,
                "includeValues": false,
                "includeMetadata": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "matches": [
                        { "id": "x", "score": 0.9, "metadata": { "text": "a" } },
                        { "id": "y", "score": 0.8, "metadata": { "text": "b" } },
                        { "id": "z", "score": 0.7 }
                    ],
                    "namespace": "chat"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let index = index_for(&server).await;
        let matches = index
            .query("chat", QueryRequest::new(vec![1.0, 0.0], 5))
            .await
            .unwrap();

        mock.assert_async().await;
        let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(matches[1].text(), Some("b"));
        assert_eq!(matches[2].text(), None);
    }

    #[tokio::test]
    async fn test_query_maps_error_status_to_retrieval() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/query")
            .with_status(503)
            .create_async()
            .await;

        let index = index_for(&server).await;
        let err = index
            .query("default", QueryRequest::new(vec![1.0], 5))
            .await
            .unwrap_err();

        assert!(matches!(err, MemoryError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_connect_resolves_host_from_control_plane() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let describe = server
            .mock("GET", "/indexes/memories")
            .match_header("api-key", "pc-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "name": "memories", "host": url }).to_string())
            .create_async()
            .await;

        let config = PineconeConfig::new("pc-test".to_string(), "memories".to_string())
            .with_controller_url(url.clone());
        let index = PineconeIndex::connect(config).await.unwrap();

        describe.assert_async().await;
        assert_eq!(index.host(), url);
    }

    #[tokio::test]
    async fn test_connect_fails_for_unknown_index() {
        let mut server = mockito::Server::new_async().await;
        let _describe = server
            .mock("GET", Matcher::Regex("^/indexes/".to_string()))
            .with_status(404)
            .with_body(r#"{"error":{"code":"NOT_FOUND"}}"#)
            .create_async()
            .await;

        let config = PineconeConfig::new("pc-test".to_string(), "missing".to_string())
            .with_controller_url(server.url());
        let err = PineconeIndex::connect(config).await.err().unwrap();

        assert!(matches!(err, MemoryError::Config(msg) if msg.contains("404")));
    }
}
