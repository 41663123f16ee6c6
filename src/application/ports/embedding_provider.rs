use async_trait::async_trait;

#[derive(Debug)]
pub enum EmbeddingProviderError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    ServiceUnavailable,
}

impl std::fmt::Display for EmbeddingProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingProviderError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EmbeddingProviderError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for EmbeddingProviderError {}

/// External embedding inference service. The vector dimension is fixed for
/// the lifetime of the process and must match the vector store's collection.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingProviderError>;

    fn embedding_dimension(&self) -> usize;
}
