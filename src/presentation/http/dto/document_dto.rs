use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::use_cases::ingest_document::IngestDocumentResponse;
use crate::domain::entities::Document;
use crate::presentation::http::dto::PaginationMetaDto;

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub document_id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub chunk_strategy: String,
    pub total_chunks: i32,
    pub vector_ids: Vec<Uuid>,
}

impl From<IngestDocumentResponse> for UploadResponseDto {
    fn from(response: IngestDocumentResponse) -> Self {
        Self {
            document_id: response.document_id,
            filename: response.file_name,
            file_type: response.file_type,
            chunk_strategy: response.chunk_strategy.as_str().to_string(),
            total_chunks: response.chunk_count,
            vector_ids: response.vector_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub chunk_strategy: String,
    pub chunk_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            filename: document.file_name().to_string(),
            file_type: document.file_type().to_string(),
            chunk_strategy: document.chunk_strategy().as_str().to_string(),
            chunk_count: document.chunk_count(),
            created_at: document.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentResponseDto>,
    pub meta: PaginationMetaDto,
}
