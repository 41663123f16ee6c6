use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
pub struct EmbeddingsRequest {
    pub text: TextInput,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Deserialize)]
pub struct EmbeddingsResponse {
    pub success: bool,
    pub embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub dimension: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl Default for EmbeddingsClientConfig {
    fn default() -> Self {
        let service_url = env::var("EMBEDDINGS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/embeddings".to_string());

        let dimension = env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(384);

        Self {
            service_url,
            dimension,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }
}

/// Client for the remote sentence-embedding inference service. Retries
/// transient failures with exponential backoff.
#[derive(Debug, Clone)]
pub struct InferenceEmbeddingProvider {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceEmbeddingProvider {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(EmbeddingsClientConfig::default())
    }

    async fn send_request(
        &self,
        request: EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.execute_request(&request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error.unwrap_or(EmbeddingProviderError::ServiceUnavailable))
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let response = self
            .client
            .post(&self.config.service_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Embedding service returned {}",
                response.status()
            )));
        }

        let parsed = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        if !parsed.success {
            return Err(EmbeddingProviderError::ApiError(
                "Embedding service reported failure".to_string(),
            ));
        }

        Ok(parsed)
    }

    fn check_dimensions(&self, embeddings: &[Vec<f32>]) -> Result<(), EmbeddingProviderError> {
        for embedding in embeddings {
            if embedding.len() != self.config.dimension {
                return Err(EmbeddingProviderError::ApiError(format!(
                    "Embedding service returned dimension {}, expected {}",
                    embedding.len(),
                    self.config.dimension
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        if text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "Cannot embed empty text".to_string(),
            ));
        }

        let request = EmbeddingsRequest {
            text: TextInput::Single(text.to_string()),
        };

        let response = self.send_request(request).await?;
        self.check_dimensions(&response.embeddings)?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingProviderError::ApiError(
                    "Embedding service returned no vectors".to_string(),
                )
            })
    }

    async fn embed_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingsRequest {
            text: TextInput::Multiple(texts.to_vec()),
        };

        let response = self.send_request(request).await?;
        self.check_dimensions(&response.embeddings)?;

        if response.embeddings.len() != texts.len() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response.embeddings)
    }

    fn embedding_dimension(&self) -> usize {
        self.config.dimension
    }
}
