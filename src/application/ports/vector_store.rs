use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug)]
pub enum VectorStoreError {
    /// Query or record vector length differs from the collection dimension.
    DimensionMismatch { expected: usize, actual: usize },
    /// The backend rejected the request shape (API version skew). The caller
    /// may retry with a structurally simplified query.
    BackendIncompatible(String),
    NetworkError(String),
    BackendError(String),
}

impl std::fmt::Display for VectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorStoreError::DimensionMismatch { expected, actual } => write!(
                f,
                "Embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            VectorStoreError::BackendIncompatible(msg) => {
                write!(f, "Vector backend incompatible: {}", msg)
            }
            VectorStoreError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            VectorStoreError::BackendError(msg) => write!(f, "Vector backend error: {}", msg),
        }
    }
}

impl std::error::Error for VectorStoreError {}

/// Payload stored next to each embedding. `chunk_index` orders chunks within
/// their document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub document_id: Uuid,
    pub filename: String,
    pub chunk_index: i32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct VectorRecord {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: RecordPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub payload: RecordPayload,
    pub score: f32,
}

/// Search request against the collection. `score_threshold` and `hnsw_ef`
/// belong to the full request shape; [`SearchQuery::simplified`] strips them
/// for backends that reject unknown parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: usize,
    pub score_threshold: Option<f32>,
    pub hnsw_ef: Option<usize>,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>, limit: usize) -> Self {
        Self {
            vector,
            limit,
            score_threshold: None,
            hnsw_ef: None,
        }
    }

    /// Structurally minimal variant of this query: vector and limit only.
    pub fn simplified(&self) -> Self {
        Self {
            vector: self.vector.clone(),
            limit: self.limit,
            score_threshold: None,
            hnsw_ef: None,
        }
    }
}

/// External vector similarity store. One fixed-name collection, cosine
/// distance, fixed dimension.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet.
    async fn ensure_collection(&self) -> Result<(), VectorStoreError>;

    async fn upsert(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError>;

    /// Ranked nearest records, highest similarity first.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ScoredRecord>, VectorStoreError>;

    fn collection_dimension(&self) -> usize;
}
