use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::VectorStore;
use crate::application::ports::vector_store::{ScoredRecord, SearchQuery, VectorStoreError};

#[derive(Debug)]
pub enum RetrievalError {
    ValidationError(String),
    DimensionMismatch { expected: usize, actual: usize },
    Unavailable(String),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RetrievalError::DimensionMismatch { expected, actual } => write!(
                f,
                "Embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            RetrievalError::Unavailable(msg) => write!(f, "Retrieval unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// A chunk returned from the vector store, ready for prompt assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub text: String,
    pub score: f32,
    pub document_id: Uuid,
    pub filename: String,
    pub chunk_index: i32,
}

impl From<ScoredRecord> for RetrievedChunk {
    fn from(record: ScoredRecord) -> Self {
        Self {
            text: record.payload.text,
            score: record.score,
            document_id: record.payload.document_id,
            filename: record.payload.filename,
            chunk_index: record.payload.chunk_index,
        }
    }
}

/// Top-K cosine retrieval over the vector store, with the single structural
/// fallback for backends that reject the full query shape.
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
    score_threshold: Option<f32>,
    hnsw_ef: usize,
}

impl Retriever {
    pub fn new(vector_store: Arc<dyn VectorStore>, score_threshold: Option<f32>) -> Self {
        Self {
            vector_store,
            score_threshold,
            hnsw_ef: 128,
        }
    }

    pub async fn retrieve(
        &self,
        query_embedding: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        if top_k == 0 {
            return Err(RetrievalError::ValidationError(
                "top_k must be a positive integer".to_string(),
            ));
        }

        let expected = self.vector_store.collection_dimension();
        if query_embedding.len() != expected {
            return Err(RetrievalError::DimensionMismatch {
                expected,
                actual: query_embedding.len(),
            });
        }

        let mut query = SearchQuery::new(query_embedding, top_k);
        query.score_threshold = self.score_threshold;
        query.hnsw_ef = Some(self.hnsw_ef);

        let records = match self.vector_store.search(&query).await {
            Ok(records) => records,
            Err(VectorStoreError::BackendIncompatible(reason)) => {
                tracing::warn!(
                    "Vector backend rejected full query ({}), retrying simplified",
                    reason
                );
                self.vector_store
                    .search(&query.simplified())
                    .await
                    .map_err(|e| RetrievalError::Unavailable(e.to_string()))?
            }
            Err(VectorStoreError::DimensionMismatch { expected, actual }) => {
                return Err(RetrievalError::DimensionMismatch { expected, actual });
            }
            Err(e) => return Err(RetrievalError::Unavailable(e.to_string())),
        };

        let mut chunks: Vec<RetrievedChunk> =
            records.into_iter().map(RetrievedChunk::from).collect();

        // Stable sort keeps insertion order among equal scores, and the
        // simplified query may have returned more than top_k.
        chunks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        chunks.truncate(top_k);

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::vector_store::{RecordPayload, VectorRecord};

    struct FakeVectorStore {
        dimension: usize,
        records: Vec<ScoredRecord>,
        reject_full_query: bool,
        searches: Mutex<Vec<SearchQuery>>,
    }

    impl FakeVectorStore {
        fn with_records(records: Vec<ScoredRecord>) -> Self {
            Self {
                dimension: 4,
                records,
                reject_full_query: false,
                searches: Mutex::new(Vec::new()),
            }
        }

        fn record(text: &str, score: f32) -> ScoredRecord {
            ScoredRecord {
                payload: RecordPayload {
                    document_id: Uuid::new_v4(),
                    filename: "doc.txt".to_string(),
                    chunk_index: 0,
                    text: text.to_string(),
                },
                score,
            }
        }
    }

    #[async_trait]
    impl VectorStore for FakeVectorStore {
        async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
            Ok(())
        }

        async fn upsert(&self, _records: &[VectorRecord]) -> Result<(), VectorStoreError> {
            Ok(())
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<ScoredRecord>, VectorStoreError> {
            self.searches.lock().unwrap().push(query.clone());

            if self.reject_full_query && query.hnsw_ef.is_some() {
                return Err(VectorStoreError::BackendIncompatible(
                    "unknown field `params`".to_string(),
                ));
            }

            Ok(self.records.clone())
        }

        fn collection_dimension(&self) -> usize {
            self.dimension
        }
    }

    #[tokio::test]
    async fn test_results_ordered_by_descending_score() {
        let store = FakeVectorStore::with_records(vec![
            FakeVectorStore::record("low", 0.2),
            FakeVectorStore::record("high", 0.9),
            FakeVectorStore::record("mid", 0.5),
        ]);
        let retriever = Retriever::new(Arc::new(store), None);

        let chunks = retriever.retrieve(vec![0.0; 4], 3).await.unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["high", "mid", "low"]);
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = FakeVectorStore::with_records(vec![
            FakeVectorStore::record("first", 0.5),
            FakeVectorStore::record("second", 0.5),
        ]);
        let retriever = Retriever::new(Arc::new(store), None);

        let chunks = retriever.retrieve(vec![0.0; 4], 2).await.unwrap();
        assert_eq!(chunks[0].text, "first");
        assert_eq!(chunks[1].text, "second");
    }

    #[tokio::test]
    async fn test_dimension_mismatch_fails_fast() {
        let store = FakeVectorStore::with_records(vec![]);
        let retriever = Retriever::new(Arc::new(store), None);

        let result = retriever.retrieve(vec![0.0; 3], 2).await;
        assert!(matches!(
            result,
            Err(RetrievalError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_zero_top_k_is_rejected() {
        let store = FakeVectorStore::with_records(vec![]);
        let retriever = Retriever::new(Arc::new(store), None);

        assert!(matches!(
            retriever.retrieve(vec![0.0; 4], 0).await,
            Err(RetrievalError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_incompatible_backend_falls_back_to_simplified_query() {
        let mut store = FakeVectorStore::with_records(vec![
            FakeVectorStore::record("a", 0.9),
            FakeVectorStore::record("b", 0.8),
            FakeVectorStore::record("c", 0.7),
        ]);
        store.reject_full_query = true;
        let store = Arc::new(store);
        let retriever = Retriever::new(store.clone(), Some(0.1));

        let chunks = retriever.retrieve(vec![0.0; 4], 2).await.unwrap();
        assert_eq!(chunks.len(), 2);

        let searches = store.searches.lock().unwrap();
        assert_eq!(searches.len(), 2);
        assert!(searches[0].hnsw_ef.is_some());
        assert!(searches[1].hnsw_ef.is_none());
        assert!(searches[1].score_threshold.is_none());
    }

    #[tokio::test]
    async fn test_fewer_records_than_top_k_returns_all() {
        let store = FakeVectorStore::with_records(vec![FakeVectorStore::record("only", 0.4)]);
        let retriever = Retriever::new(Arc::new(store), None);

        let chunks = retriever.retrieve(vec![0.0; 4], 10).await.unwrap();
        assert_eq!(chunks.len(), 1);
    }
}
