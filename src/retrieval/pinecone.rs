//! Pinecone vector-database client.
//!
//! The control plane is hit once per process to resolve the index's
//! data-plane host; every query afterwards reuses that handle. There is no
//! pooling or reconnection logic, a failed request surfaces to the caller.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::debug;

use super::{Document, VectorStore};

const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

/// Metadata field holding the document text, as written by the indexer.
const TEXT_KEY: &str = "text";

/// Client for one named Pinecone index.
pub struct PineconeStore {
    http: Client,
    api_key: String,
    index_name: String,
    controller_url: String,
    /// Data-plane endpoint, resolved at most once per process.
    host: OnceCell<String>,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    #[serde(default)]
    metadata: Option<serde_json::Map<String, Value>>,
}

impl PineconeStore {
    pub fn new(api_key: String, index_name: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(concat!("haki-mcp/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
            index_name,
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            host: OnceCell::new(),
        }
    }

    /// Point the client at a different control-plane endpoint.
    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = url.into();
        self
    }

    /// The index's data-plane endpoint, resolving it on first use.
    ///
    /// `OnceCell` guards the construction, so concurrent first calls still
    /// hit the control plane only once.
    async fn index_host(&self) -> Result<&str> {
        let host = self
            .host
            .get_or_try_init(|| self.describe_index())
            .await?;
        Ok(host.as_str())
    }

    /// Look up the index on the control plane and return its host URL.
    async fn describe_index(&self) -> Result<String> {
        let url = format!("{}/indexes/{}", self.controller_url, self.index_name);
        let response = self
            .http
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "failed to describe index `{}`: {}: {}",
                self.index_name,
                status,
                detail
            );
        }

        let described: DescribeIndexResponse = response.json().await?;

        // The control plane returns a bare hostname.
        let host = if described.host.contains("://") {
            described.host
        } else {
            format!("https://{}", described.host)
        };

        debug!("Resolved index `{}` to host {}", self.index_name, host);
        Ok(host)
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Document>> {
        let host = self.index_host().await?;
        let url = format!("{}/query", host);

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&json!({
                "vector": vector,
                "topK": top_k,
                "includeMetadata": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("vector query failed with {}: {}", status, detail);
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(parsed.matches.into_iter().map(into_document).collect())
    }
}

/// Split a match's metadata into the stored text and the remaining fields.
fn into_document(m: QueryMatch) -> Document {
    let mut metadata = m.metadata.unwrap_or_default();
    let page_content = match metadata.remove(TEXT_KEY) {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Document {
        page_content,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_for(server: &mockito::Server) -> PineconeStore {
        PineconeStore::new("pc-test".to_string(), "case-law".to_string())
            .with_controller_url(server.url())
    }

    #[tokio::test]
    async fn test_index_host_resolved_once() {
        let mut server = mockito::Server::new_async().await;
        let describe = server
            .mock("GET", "/indexes/case-law")
            .match_header("api-key", "pc-test")
            .with_status(200)
            .with_body(format!(r#"{{"host":"{}","name":"case-law"}}"#, server.url()))
            .expect(1)
            .create_async()
            .await;

        let store = store_for(&server);
        let first = store.index_host().await.unwrap().to_string();
        let second = store.index_host().await.unwrap().to_string();

        assert_eq!(first, second);
        describe.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_maps_matches_to_documents() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexes/case-law")
            .with_status(200)
            .with_body(format!(r#"{{"host":"{}"}}"#, server.url()))
            .create_async()
            .await;
        server
            .mock("POST", "/query")
            .match_header("api-key", "pc-test")
            .with_status(200)
            .with_body(
                r#"{"matches":[
                    {"id":"a","score":0.9,"metadata":{"text":"Ruling text A","case":"1"}},
                    {"id":"b","score":0.7,"metadata":{"text":"Ruling text B","case":"2"}}
                ]}"#,
            )
            .create_async()
            .await;

        let store = store_for(&server);
        let docs = store.query(&[0.0, 1.0], 2).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].page_content, "Ruling text A");
        assert_eq!(docs[0].metadata.get("case"), Some(&Value::from("1")));
        assert!(!docs[0].metadata.contains_key("text"));
        assert_eq!(docs[1].page_content, "Ruling text B");
    }

    #[tokio::test]
    async fn test_query_with_no_matches() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexes/case-law")
            .with_status(200)
            .with_body(format!(r#"{{"host":"{}"}}"#, server.url()))
            .create_async()
            .await;
        server
            .mock("POST", "/query")
            .with_status(200)
            .with_body(r#"{"matches":[]}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        let docs = store.query(&[0.5], 4).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_index_surfaces_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexes/case-law")
            .with_status(404)
            .with_body(r#"{"error":"index not found"}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        let err = store.query(&[0.5], 4).await.unwrap_err();
        assert!(err.to_string().contains("case-law"));
    }

    #[test]
    fn test_into_document_without_text_key() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("case".to_string(), Value::from("3"));
        let doc = into_document(QueryMatch {
            metadata: Some(metadata),
        });
        assert_eq!(doc.page_content, "");
        assert_eq!(doc.metadata.get("case"), Some(&Value::from("3")));
    }
}
