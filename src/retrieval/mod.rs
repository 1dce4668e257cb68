//! Retrieval path: embeddings, vector-database access, and the retriever
//! that binds the two into a similarity search over the case-law index.

mod embedding;
mod pinecone;
mod retriever;

pub use embedding::OpenAiEmbedder;
pub use pinecone::PineconeStore;
pub use retriever::{Document, Retriever};

use anyhow::Result;
use async_trait::async_trait;

/// Produces a vector representation of a piece of text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// A query-capable vector index returning the closest stored documents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Document>>;
}
