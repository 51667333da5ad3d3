//! Embedding client for hosted and local LLM providers

use super::{EmbedError, EmbedResult, EmbeddingProvider, LLMProvider};
use crate::config::EmbeddingConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Client for interacting with LLM APIs to generate embeddings
pub struct EmbeddingClient {
    client: Client,
    provider: LLMProvider,
    model: String,
    api_key: Option<String>,
    api_base_url: String,
}

impl EmbeddingClient {
    /// Create a new embedding client based on configuration
    pub fn new(config: &EmbeddingConfig) -> EmbedResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbedError::ConfigError(e.to_string()))?;

        if config.provider == LLMProvider::AzureOpenAI && config.api_base_url.is_none() {
            return Err(EmbedError::ConfigError("AzureOpenAI requires api_base_url".to_string()));
        }

        let api_base_url = config.api_base_url.clone().unwrap_or_else(|| match config.provider {
            LLMProvider::OpenAI => "https://api.openai.com/v1".to_string(),
            LLMProvider::Ollama => "http://localhost:11434".to_string(),
            LLMProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta".to_string(),
            LLMProvider::AzureOpenAI => String::new(),
        });

        Ok(Self {
            client,
            provider: config.provider,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    /// Generate embeddings for a batch of texts
    pub async fn generate_embeddings(&self, texts: &[String]) -> EmbedResult<Vec<Vec<f32>>> {
        debug!("Requesting {} embeddings from {:?} ({})", texts.len(), self.provider, self.model);
        match self.provider {
            LLMProvider::OpenAI => {
                let api_key = self.require_key("OpenAI")?;
                let url = format!("{}/embeddings", self.api_base_url);
                let request = self
                    .client
                    .post(&url)
                    .header("Authorization", format!("Bearer {}", api_key));
                self.openai_style_embeddings(request, texts, "OpenAI").await
            }
            LLMProvider::AzureOpenAI => {
                let api_key = self.require_key("AzureOpenAI")?;
                let url = format!(
                    "{}/openai/deployments/{}/embeddings?api-version=2023-05-15",
                    self.api_base_url, self.model
                );
                let request = self.client.post(&url).header("api-key", api_key);
                self.openai_style_embeddings(request, texts, "AzureOpenAI").await
            }
            LLMProvider::Ollama => self.ollama_embeddings(texts).await,
            LLMProvider::Gemini => self.gemini_embeddings(texts).await,
        }
    }

    fn require_key(&self, provider: &str) -> EmbedResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| EmbedError::ConfigError(format!("{} requires API key", provider)))
    }

    async fn openai_style_embeddings(
        &self,
        request: reqwest::RequestBuilder,
        texts: &[String],
        provider: &str,
    ) -> EmbedResult<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a [String],
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<OpenAIData>,
        }

        #[derive(Deserialize)]
        struct OpenAIData {
            index: usize,
            embedding: Vec<f32>,
        }

        let resp = request
            .json(&OpenAIRequest {
                input: texts,
                model: &self.model,
            })
            .send()
            .await
            .map_err(|e| EmbedError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(EmbedError::ApiError(format!("{} returned error: {}", provider, error_text)));
        }

        let mut result: OpenAIResponse = resp
            .json()
            .await
            .map_err(|e| EmbedError::SerializationError(e.to_string()))?;
        // The API does not promise response order
        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    async fn ollama_embeddings(&self, texts: &[String]) -> EmbedResult<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.api_base_url);
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let resp = self
                .client
                .post(&url)
                .json(&OllamaRequest {
                    model: &self.model,
                    prompt: text,
                })
                .send()
                .await
                .map_err(|e| EmbedError::NetworkError(e.to_string()))?;

            if !resp.status().is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(EmbedError::ApiError(format!("Ollama returned error: {}", error_text)));
            }

            let result: OllamaResponse = resp
                .json()
                .await
                .map_err(|e| EmbedError::SerializationError(e.to_string()))?;
            results.push(result.embedding);
        }

        Ok(results)
    }

    async fn gemini_embeddings(&self, texts: &[String]) -> EmbedResult<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct GeminiBatchRequest<'a> {
            requests: Vec<GeminiRequest<'a>>,
        }

        #[derive(Serialize)]
        struct GeminiRequest<'a> {
            model: String,
            content: GeminiContent<'a>,
        }

        #[derive(Serialize)]
        struct GeminiContent<'a> {
            parts: Vec<GeminiPart<'a>>,
        }

        #[derive(Serialize)]
        struct GeminiPart<'a> {
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct GeminiBatchResponse {
            embeddings: Vec<GeminiEmbedding>,
        }

        #[derive(Deserialize)]
        struct GeminiEmbedding {
            values: Vec<f32>,
        }

        let api_key = self.require_key("Gemini")?;
        let url = format!(
            "{}/models/{}:batchEmbedContents?key={}",
            self.api_base_url, self.model, api_key
        );

        let requests = texts
            .iter()
            .map(|t| GeminiRequest {
                model: format!("models/{}", self.model),
                content: GeminiContent {
                    parts: vec![GeminiPart { text: t }],
                },
            })
            .collect();

        let resp = self
            .client
            .post(&url)
            .json(&GeminiBatchRequest { requests })
            .send()
            .await
            .map_err(|e| EmbedError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(EmbedError::ApiError(format!("Gemini returned error: {}", error_text)));
        }

        let result: GeminiBatchResponse = resp
            .json()
            .await
            .map_err(|e| EmbedError::SerializationError(e.to_string()))?;
        Ok(result.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, terms: &[String]) -> EmbedResult<Vec<Vec<f32>>> {
        self.generate_embeddings(terms).await
    }

    fn name(&self) -> &str {
        match self.provider {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Ollama => "ollama",
            LLMProvider::Gemini => "gemini",
            LLMProvider::AzureOpenAI => "azure-openai",
        }
    }
}
