//! Retriever binding an embedder to a vector store.

use std::sync::Arc;

use anyhow::Result;
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};

use super::{Embedder, VectorStore};

/// Number of documents returned per search unless overridden.
const DEFAULT_TOP_K: usize = 4;

/// One document returned from a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The stored text of the document chunk.
    pub page_content: String,
    /// Source metadata stored alongside the chunk (citation, court, year, ...).
    pub metadata: JsonObject,
}

/// Embeds a query and runs it against the vector store.
///
/// The retriever itself holds no connection state; the store owns the
/// lazily resolved index handle and is shared read-only across invocations.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the number of documents requested per search.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Return the documents most similar to `query`, best match first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        let vector = self.embedder.embed(query).await?;
        self.store.query(&vector, self.top_k).await
    }
}
