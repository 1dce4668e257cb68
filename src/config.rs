//! Environment-backed configuration.
//!
//! All three settings are required; a missing or empty value is a fatal
//! startup condition and must be reported before any transport is opened.

use std::env;
use std::fmt;

/// Required settings for the search server.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the embeddings service.
    pub openai_api_key: String,
    /// API key for the vector database.
    pub pinecone_api_key: String,
    /// Name of the vector index holding the case-law corpus.
    pub pinecone_index_name: String,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "required environment variable {} is missing or empty", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            pinecone_api_key: required("PINECONE_API_KEY")?,
            pinecone_index_name: required("PINECONE_INDEX_NAME")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    non_empty(name, env::var(name).ok())
}

/// Trim the raw value and reject unset or blank settings.
fn non_empty(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(ConfigError::Missing(name))
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(ConfigError::Missing(name)),
    }
}
