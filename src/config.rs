//! Configuration
//!
//! `GraphConfig` is the immutable parameter set handed to the builder. The
//! outer `AppConfig` adds the embedding provider and server sections and is
//! read from YAML. Every field has a default, so a missing section (or a
//! missing file) means "use the defaults".

use crate::embed::LLMProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters of the graph construction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Same-category pairs must exceed this similarity to be linked
    pub similarity_threshold: f64,
    /// Hub pairs across categories must exceed this similarity to be linked
    pub hub_similarity_threshold: f64,
    /// Edge length at similarity 1.0
    pub min_length: u32,
    /// Edge length at the threshold similarity
    pub max_length: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
            hub_similarity_threshold: 0.70,
            min_length: 50,
            max_length: 200,
        }
    }
}

impl GraphConfig {
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_hub_similarity_threshold(mut self, threshold: f64) -> Self {
        self.hub_similarity_threshold = threshold;
        self
    }

    pub fn with_lengths(mut self, min_length: u32, max_length: u32) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Reject parameter sets that would produce non-positive or inverted lengths
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.similarity_threshold.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "similarity_threshold must be finite, got {}",
                self.similarity_threshold
            )));
        }
        if !self.hub_similarity_threshold.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "hub_similarity_threshold must be finite, got {}",
                self.hub_similarity_threshold
            )));
        }
        if self.min_length == 0 {
            return Err(ConfigError::Invalid("min_length must be positive".to_string()));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

/// Embedding provider section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// The LLM provider to use
    pub provider: LLMProvider,
    /// Model name (e.g., "text-embedding-3-small", "nomic-embed-text")
    pub model: String,
    /// API Key (optional, can be loaded from env if None)
    pub api_key: Option<String>,
    /// API Base URL (required for Azure, optional for others)
    pub api_base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Precomputed `{term: vector}` file; when set, no HTTP provider is used
    pub vectors_path: Option<PathBuf>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Ollama,
            model: "nomic-embed-text".to_string(),
            api_key: None,
            api_base_url: None,
            timeout_secs: 30,
            vectors_path: None,
        }
    }
}

/// HTTP server section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Graph document to serve
    pub data_path: PathBuf,
    /// Flashcard collection file
    pub flashcards_path: PathBuf,
    /// Frontend assets; not served when None
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
            data_path: PathBuf::from("data.json"),
            flashcards_path: PathBuf::from("flashcards.json"),
            static_dir: Some(PathBuf::from("frontend")),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub graph: GraphConfig,
    pub embedding: EmbeddingConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Parse YAML and validate the graph section
    pub fn from_yaml_str(raw: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_yaml::from_str(raw)?;
        config.graph.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&raw)?;
        info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
