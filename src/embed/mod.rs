//! Embedding providers
//!
//! The builder asks a provider for one vector per term, exactly once per run,
//! with the full term list in node enumeration order.

pub mod client;
pub mod precomputed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::EmbeddingClient;
pub use precomputed::PrecomputedEmbeddings;

/// Embed errors
#[derive(Error, Debug)]
pub enum EmbedError {
    /// API error from LLM provider
    #[error("LLM API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error reading a vectors file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No vector available for a term
    #[error("No embedding available for term '{0}'")]
    MissingVector(String),

    /// Provider returned the wrong number of vectors
    #[error("Expected {expected} embeddings, provider returned {got}")]
    CountMismatch { expected: usize, got: usize },
}

pub type EmbedResult<T> = Result<T, EmbedError>;

/// Supported embedding backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LLMProvider {
    OpenAI,
    Ollama,
    Gemini,
    AzureOpenAI,
}

/// Maps an ordered list of terms to one vector per term, positionally aligned.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, terms: &[String]) -> EmbedResult<Vec<Vec<f32>>>;

    /// Short name for logs
    fn name(&self) -> &str;
}
