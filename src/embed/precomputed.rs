//! Vectors computed ahead of time, loaded from a `{term: [f32, ...]}` file

use super::{EmbedError, EmbedResult, EmbeddingProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// In-memory term -> vector table
#[derive(Debug, Clone, Default)]
pub struct PrecomputedEmbeddings {
    vectors: HashMap<String, Vec<f32>>,
}

impl PrecomputedEmbeddings {
    pub fn from_map(vectors: HashMap<String, Vec<f32>>) -> Self {
        Self { vectors }
    }

    pub fn from_json_str(raw: &str) -> EmbedResult<Self> {
        let vectors: HashMap<String, Vec<f32>> =
            serde_json::from_str(raw).map_err(|e| EmbedError::SerializationError(e.to_string()))?;
        Ok(Self { vectors })
    }

    pub fn from_path(path: impl AsRef<Path>) -> EmbedResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let provider = Self::from_json_str(&raw)?;
        info!("Loaded {} precomputed vectors from {:?}", provider.len(), path.as_ref());
        Ok(provider)
    }

    pub fn insert(&mut self, term: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(term.into(), vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl EmbeddingProvider for PrecomputedEmbeddings {
    async fn embed(&self, terms: &[String]) -> EmbedResult<Vec<Vec<f32>>> {
        terms
            .iter()
            .map(|term| {
                self.vectors
                    .get(term)
                    .cloned()
                    .ok_or_else(|| EmbedError::MissingVector(term.clone()))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "precomputed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embed_in_order() {
        let provider = PrecomputedEmbeddings::from_json_str(r#"{"a": [1.0, 0.0], "b": [0.0, 1.0]}"#).unwrap();
        let vectors = provider
            .embed(&["b".to_string(), "a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_missing_term_fails() {
        let mut provider = PrecomputedEmbeddings::default();
        provider.insert("a", vec![1.0]);
        let err = provider.embed(&["a".to_string(), "zzz".to_string()]).await.unwrap_err();
        assert!(matches!(err, EmbedError::MissingVector(t) if t == "zzz"));
    }

    #[test]
    fn test_malformed_file() {
        assert!(matches!(
            PrecomputedEmbeddings::from_json_str(r#"{"a": "nope"}"#),
            Err(EmbedError::SerializationError(_))
        ));
    }
}
