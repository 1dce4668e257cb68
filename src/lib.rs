// Core modules
mod config;
mod retrieval;
mod tools;
pub mod server;

// Re-export key types and functions
pub use config::{Config, ConfigError};
pub use retrieval::{Document, Embedder, OpenAiEmbedder, PineconeStore, Retriever, VectorStore};
pub use server::McpServer;
pub use tools::{
    DispatchError, SEARCH_TOOL_NAME, SearchCaseLawHandler, ToolHandler, ToolRegistry,
    format_documents,
};

use std::sync::Arc;

/// Build the retrieval path from configuration.
///
/// The returned retriever holds the process-wide vector-database client;
/// its index handle is resolved lazily on first use and reused afterwards.
pub fn build_retriever(config: &Config) -> Retriever {
    let embedder = Arc::new(OpenAiEmbedder::new(config.openai_api_key.clone()));
    let store = Arc::new(PineconeStore::new(
        config.pinecone_api_key.clone(),
        config.pinecone_index_name.clone(),
    ));
    Retriever::new(embedder, store)
}

/// Convenience function to create a fully configured MCP server.
///
/// This builds the retriever, registers the search tool, and returns a
/// McpServer that implements rmcp's ServerHandler.
pub fn create_server(config: &Config) -> Arc<McpServer> {
    let retriever = Arc::new(build_retriever(config));

    let tool_registry =
        ToolRegistry::new().register_handler(SearchCaseLawHandler::new(retriever));

    Arc::new(McpServer::new(Arc::new(tool_registry)))
}
