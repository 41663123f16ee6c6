use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::vector_store::{
    RecordPayload, ScoredRecord, SearchQuery, VectorRecord, VectorStore, VectorStoreError,
};

#[derive(Serialize)]
struct CreateCollectionBody {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Serialize)]
struct UpsertBody {
    points: Vec<PointStruct>,
}

#[derive(Serialize)]
struct PointStruct {
    id: String,
    vector: Vec<f32>,
    payload: RecordPayload,
}

#[derive(Serialize)]
struct SearchBody {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    score_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<SearchParams>,
}

#[derive(Serialize)]
struct SearchParams {
    hnsw_ef: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    score: f32,
    payload: RecordPayload,
}

#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub base_url: String,
    pub collection: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        let base_url =
            env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6333".to_string());
        let collection =
            env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "documents".to_string());
        let dimension = env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(384);

        Self {
            base_url,
            collection,
            dimension,
            timeout_secs: 30,
        }
    }
}

/// Qdrant REST adapter. One fixed-name cosine collection; a 4xx rejection of
/// the search body is reported as `BackendIncompatible`.
pub struct QdrantVectorStore {
    client: Client,
    config: QdrantConfig,
}

impl QdrantVectorStore {
    pub fn new(config: QdrantConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(QdrantConfig::default())
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.config.base_url, self.config.collection)
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
        let existing = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.to_string()))?;

        if existing.status().is_success() {
            return Ok(());
        }

        if existing.status() != StatusCode::NOT_FOUND {
            return Err(VectorStoreError::BackendError(format!(
                "Collection lookup returned {}",
                existing.status()
            )));
        }

        let body = CreateCollectionBody {
            vectors: VectorParams {
                size: self.config.dimension,
                distance: "Cosine",
            },
        };

        let response = self
            .client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::BackendError(format!(
                "Collection creation returned {}: {}",
                status, text
            )));
        }

        tracing::info!(
            "Created vector collection '{}' ({} dims, cosine)",
            self.config.collection,
            self.config.dimension
        );

        Ok(())
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError> {
        if records.is_empty() {
            return Ok(());
        }

        for record in records {
            if record.vector.len() != self.config.dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: self.config.dimension,
                    actual: record.vector.len(),
                });
            }
        }

        let body = UpsertBody {
            points: records
                .iter()
                .map(|record| PointStruct {
                    id: record.id.to_string(),
                    vector: record.vector.clone(),
                    payload: record.payload.clone(),
                })
                .collect(),
        };

        let response = self
            .client
            .put(format!("{}/points?wait=true", self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::BackendError(format!(
                "Points upsert returned {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<ScoredRecord>, VectorStoreError> {
        if query.vector.len() != self.config.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.config.dimension,
                actual: query.vector.len(),
            });
        }

        let body = SearchBody {
            vector: query.vector.clone(),
            limit: query.limit,
            with_payload: true,
            score_threshold: query.score_threshold,
            params: query.hnsw_ef.map(|hnsw_ef| SearchParams { hnsw_ef }),
        };

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status.is_client_error() {
            // Older/newer servers reject request fields they do not know.
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::BackendIncompatible(format!(
                "{}: {}",
                status, text
            )));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::BackendError(format!(
                "Points search returned {}: {}",
                status, text
            )));
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| VectorStoreError::BackendError(e.to_string()))?;

        Ok(parsed
            .result
            .into_iter()
            .map(|hit| ScoredRecord {
                payload: hit.payload,
                score: hit.score,
            })
            .collect())
    }

    fn collection_dimension(&self) -> usize {
        self.config.dimension
    }
}
