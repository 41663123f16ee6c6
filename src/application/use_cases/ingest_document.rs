use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::vector_store::{RecordPayload, VectorRecord};
use crate::application::ports::{
    DocumentExtractor, EmbeddingProvider, FileStorage, VectorStore,
    document_extractor::DocumentExtractionError,
};
use crate::application::services::Chunker;
use crate::domain::entities::Document;
use crate::domain::repositories::DocumentRepository;
use crate::domain::value_objects::{ChunkStrategy, ContentHash};

#[derive(Debug)]
pub enum IngestDocumentError {
    ValidationError(String),
    UnsupportedFormat(String),
    EmptyDocument,
    DuplicateDocument(Uuid),
    ExtractionError(String),
    EmbeddingError(String),
    VectorStoreError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for IngestDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            IngestDocumentError::UnsupportedFormat(format) => {
                write!(f, "Unsupported file type '{}'. Only .pdf and .txt are accepted", format)
            }
            IngestDocumentError::EmptyDocument => {
                write!(f, "No readable text found in document; nothing was indexed")
            }
            IngestDocumentError::DuplicateDocument(id) => {
                write!(f, "This document was already ingested as {}", id)
            }
            IngestDocumentError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            IngestDocumentError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IngestDocumentError::VectorStoreError(msg) => {
                write!(f, "Vector store error: {}", msg)
            }
            IngestDocumentError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            IngestDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for IngestDocumentError {}

#[derive(Debug, Clone)]
pub struct IngestDocumentRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub chunk_strategy: ChunkStrategy,
}

#[derive(Debug, Clone)]
pub struct IngestDocumentResponse {
    pub document_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub chunk_strategy: ChunkStrategy,
    pub chunk_count: i32,
    pub vector_ids: Vec<Uuid>,
}

/// Upload pipeline: store the raw file, extract text, chunk it, embed the
/// chunks, upsert one vector record per chunk, and persist the document row.
pub struct IngestDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
    document_extractor: Arc<dyn DocumentExtractor>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Chunker,
}

impl IngestDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
        document_extractor: Arc<dyn DocumentExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        chunker: Chunker,
    ) -> Self {
        Self {
            document_repository,
            file_storage,
            document_extractor,
            embedding_provider,
            vector_store,
            chunker,
        }
    }

    pub async fn execute(
        &self,
        request: IngestDocumentRequest,
    ) -> Result<IngestDocumentResponse, IngestDocumentError> {
        if request.file_name.trim().is_empty() {
            return Err(IngestDocumentError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        if request.file_data.is_empty() {
            return Err(IngestDocumentError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        let file_type = Self::file_type_from_name(&request.file_name)?;

        let content_hash = ContentHash::from_bytes(&request.file_data);
        if let Ok(Some(existing)) = self
            .document_repository
            .find_by_hash(content_hash.as_str())
            .await
        {
            return Err(IngestDocumentError::DuplicateDocument(existing.id()));
        }

        let text = self
            .document_extractor
            .extract_text(&request.file_data, &file_type)
            .await
            .map_err(|e| match e {
                DocumentExtractionError::UnsupportedFormat(format) => {
                    IngestDocumentError::UnsupportedFormat(format)
                }
                DocumentExtractionError::EmptyDocument => IngestDocumentError::EmptyDocument,
                other => IngestDocumentError::ExtractionError(other.to_string()),
            })?;

        let chunks = self.chunker.chunk(&text, request.chunk_strategy);
        if chunks.is_empty() {
            return Err(IngestDocumentError::EmptyDocument);
        }

        let embeddings = self
            .embedding_provider
            .embed_batch(&chunks)
            .await
            .map_err(|e| IngestDocumentError::EmbeddingError(e.to_string()))?;

        if embeddings.len() != chunks.len() {
            return Err(IngestDocumentError::EmbeddingError(format!(
                "Embedding count {} does not match chunk count {}",
                embeddings.len(),
                chunks.len()
            )));
        }

        let expected_dimension = self.vector_store.collection_dimension();
        for embedding in &embeddings {
            if embedding.len() != expected_dimension {
                return Err(IngestDocumentError::EmbeddingError(format!(
                    "Embedding dimension mismatch: expected {}, got {}",
                    expected_dimension,
                    embedding.len()
                )));
            }
        }

        let vector_ids: Vec<Uuid> = chunks.iter().map(|_| Uuid::new_v4()).collect();

        let document = Document::new(
            request.file_name.clone(),
            file_type.clone(),
            request.chunk_strategy,
            chunks.len() as i32,
            vector_ids.clone(),
            content_hash,
        );

        self.file_storage
            .store_file(document.id(), &request.file_data)
            .await
            .map_err(|e| IngestDocumentError::StorageError(e.to_string()))?;

        let records: Vec<VectorRecord> = chunks
            .iter()
            .zip(embeddings)
            .zip(&vector_ids)
            .enumerate()
            .map(|(index, ((chunk, vector), id))| VectorRecord {
                id: *id,
                vector,
                payload: RecordPayload {
                    document_id: document.id(),
                    filename: request.file_name.clone(),
                    chunk_index: index as i32,
                    text: chunk.clone(),
                },
            })
            .collect();

        self.vector_store
            .upsert(&records)
            .await
            .map_err(|e| IngestDocumentError::VectorStoreError(e.to_string()))?;

        self.document_repository
            .save(&document)
            .await
            .map_err(|e| IngestDocumentError::RepositoryError(e.to_string()))?;

        tracing::info!(
            "Ingested {} as {} ({} chunks, {} strategy)",
            document.file_name(),
            document.id(),
            document.chunk_count(),
            document.chunk_strategy()
        );

        Ok(IngestDocumentResponse {
            document_id: document.id(),
            file_name: request.file_name,
            file_type,
            chunk_strategy: request.chunk_strategy,
            chunk_count: document.chunk_count(),
            vector_ids,
        })
    }

    fn file_type_from_name(file_name: &str) -> Result<String, IngestDocumentError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" | "txt" => Ok(extension),
            _ => Err(IngestDocumentError::UnsupportedFormat(
                if extension.is_empty() {
                    file_name.to_string()
                } else {
                    extension
                },
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::document_extractor::DocumentExtractionError;
    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::application::ports::file_storage::FileStorageError;
    use crate::application::ports::vector_store::{ScoredRecord, SearchQuery, VectorStoreError};
    use crate::domain::repositories::document_repository::DocumentRepositoryError;

    #[derive(Default)]
    struct FakeDocumentRepository {
        saved: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl DocumentRepository for FakeDocumentRepository {
        async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.saved.lock().unwrap().push(document.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id() == id)
                .cloned())
        }

        async fn find_by_hash(
            &self,
            hash: &str,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.content_hash().as_str() == hash)
                .cloned())
        }

        async fn find_all(
            &self,
            _skip: i64,
            _limit: i64,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn count(&self) -> Result<i64, DocumentRepositoryError> {
            Ok(self.saved.lock().unwrap().len() as i64)
        }
    }

    #[derive(Default)]
    struct FakeFileStorage;

    #[async_trait]
    impl FileStorage for FakeFileStorage {
        async fn store_file(
            &self,
            document_id: Uuid,
            _data: &[u8],
        ) -> Result<String, FileStorageError> {
            Ok(format!("/tmp/{}", document_id))
        }

        async fn retrieve_file(&self, _document_id: Uuid) -> Result<Vec<u8>, FileStorageError> {
            Ok(Vec::new())
        }

        async fn delete_file(&self, _document_id: Uuid) -> Result<bool, FileStorageError> {
            Ok(false)
        }
    }

    struct Utf8Extractor;

    #[async_trait]
    impl DocumentExtractor for Utf8Extractor {
        async fn extract_text(
            &self,
            data: &[u8],
            _file_type: &str,
        ) -> Result<String, DocumentExtractionError> {
            let text = String::from_utf8_lossy(data).to_string();
            if text.trim().is_empty() {
                return Err(DocumentExtractionError::EmptyDocument);
            }
            Ok(text)
        }

        fn can_extract(&self, file_type: &str) -> bool {
            file_type == "txt"
        }
    }

    struct FakeEmbeddingProvider {
        dimension: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbeddingProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
            Ok(vec![0.1; self.dimension])
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vec<f32>>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| vec![0.1; self.dimension]).collect())
        }

        fn embedding_dimension(&self) -> usize {
            self.dimension
        }
    }

    #[derive(Default)]
    struct RecordingVectorStore {
        upserted: Mutex<Vec<VectorRecord>>,
    }

    #[async_trait]
    impl VectorStore for RecordingVectorStore {
        async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
            Ok(())
        }

        async fn upsert(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError> {
            self.upserted.lock().unwrap().extend_from_slice(records);
            Ok(())
        }

        async fn search(
            &self,
            _query: &SearchQuery,
        ) -> Result<Vec<ScoredRecord>, VectorStoreError> {
            Ok(Vec::new())
        }

        fn collection_dimension(&self) -> usize {
            384
        }
    }

    fn use_case(
        repository: Arc<FakeDocumentRepository>,
        vector_store: Arc<RecordingVectorStore>,
    ) -> IngestDocumentUseCase {
        IngestDocumentUseCase::new(
            repository,
            Arc::new(FakeFileStorage),
            Arc::new(Utf8Extractor),
            Arc::new(FakeEmbeddingProvider { dimension: 384 }),
            vector_store,
            Chunker::default(),
        )
    }

    #[tokio::test]
    async fn test_fifty_word_document_yields_one_chunk_and_one_vector() {
        let repository = Arc::new(FakeDocumentRepository::default());
        let vector_store = Arc::new(RecordingVectorStore::default());
        let ingest = use_case(repository.clone(), vector_store.clone());

        let text = "word ".repeat(50);
        let response = ingest
            .execute(IngestDocumentRequest {
                file_name: "universe.txt".to_string(),
                file_data: text.into_bytes(),
                chunk_strategy: ChunkStrategy::Fixed,
            })
            .await
            .unwrap();

        assert_eq!(response.chunk_count, 1);
        assert_eq!(response.vector_ids.len(), 1);
        assert_eq!(vector_store.upserted.lock().unwrap().len(), 1);
        assert_eq!(repository.saved.lock().unwrap().len(), 1);

        let record = &vector_store.upserted.lock().unwrap()[0];
        assert_eq!(record.payload.filename, "universe.txt");
        assert_eq!(record.payload.chunk_index, 0);
        assert_eq!(record.id, response.vector_ids[0]);
    }

    #[tokio::test]
    async fn test_whitespace_only_document_is_rejected() {
        let ingest = use_case(
            Arc::new(FakeDocumentRepository::default()),
            Arc::new(RecordingVectorStore::default()),
        );

        let result = ingest
            .execute(IngestDocumentRequest {
                file_name: "blank.txt".to_string(),
                file_data: b"   \n\n  ".to_vec(),
                chunk_strategy: ChunkStrategy::Paragraph,
            })
            .await;

        assert!(matches!(result, Err(IngestDocumentError::EmptyDocument)));
    }

    #[tokio::test]
    async fn test_unknown_extension_is_rejected() {
        let ingest = use_case(
            Arc::new(FakeDocumentRepository::default()),
            Arc::new(RecordingVectorStore::default()),
        );

        let result = ingest
            .execute(IngestDocumentRequest {
                file_name: "sheet.xlsx".to_string(),
                file_data: b"cells".to_vec(),
                chunk_strategy: ChunkStrategy::Fixed,
            })
            .await;

        assert!(matches!(
            result,
            Err(IngestDocumentError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_upload_is_rejected() {
        let repository = Arc::new(FakeDocumentRepository::default());
        let ingest = use_case(repository.clone(), Arc::new(RecordingVectorStore::default()));

        let request = IngestDocumentRequest {
            file_name: "notes.txt".to_string(),
            file_data: b"same bytes both times".to_vec(),
            chunk_strategy: ChunkStrategy::Fixed,
        };

        let first = ingest.execute(request.clone()).await.unwrap();
        let second = ingest.execute(request).await;

        assert!(matches!(
            second,
            Err(IngestDocumentError::DuplicateDocument(id)) if id == first.document_id
        ));
    }

    #[tokio::test]
    async fn test_paragraph_strategy_indexes_each_paragraph() {
        let vector_store = Arc::new(RecordingVectorStore::default());
        let ingest = use_case(Arc::new(FakeDocumentRepository::default()), vector_store.clone());

        let response = ingest
            .execute(IngestDocumentRequest {
                file_name: "faq.txt".to_string(),
                file_data: b"How was the universe formed?\n\nIt began with the Big Bang.".to_vec(),
                chunk_strategy: ChunkStrategy::Paragraph,
            })
            .await
            .unwrap();

        assert_eq!(response.chunk_count, 2);
        let upserted = vector_store.upserted.lock().unwrap();
        assert_eq!(upserted[0].payload.chunk_index, 0);
        assert_eq!(upserted[1].payload.chunk_index, 1);
    }
}
