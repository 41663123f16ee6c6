use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::use_cases::{
    IngestDocumentUseCase, ListDocumentsUseCase,
    ingest_document::{IngestDocumentError, IngestDocumentRequest},
    list_documents::ListDocumentsRequest,
};
use crate::domain::value_objects::ChunkStrategy;
use crate::presentation::http::dto::{
    ApiResponse, DocumentListResponseDto, DocumentResponseDto, PaginationDto, PaginationMetaDto,
    UploadResponseDto,
};

pub struct DocumentHandler {
    ingest_use_case: Arc<IngestDocumentUseCase>,
    list_documents_use_case: Arc<ListDocumentsUseCase>,
}

impl DocumentHandler {
    pub fn new(
        ingest_use_case: Arc<IngestDocumentUseCase>,
        list_documents_use_case: Arc<ListDocumentsUseCase>,
    ) -> Self {
        Self {
            ingest_use_case,
            list_documents_use_case,
        }
    }

    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut file_name: Option<String> = None;
        let mut file_data: Option<Vec<u8>> = None;
        let mut chunk_strategy = ChunkStrategy::Fixed;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let field_name = field.name().map(|name| name.to_string());

            match field_name.as_deref() {
                Some("file") => {
                    let original_name = field
                        .file_name()
                        .ok_or(StatusCode::BAD_REQUEST)?
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|_| StatusCode::BAD_REQUEST)?
                        .to_vec();

                    file_name = Some(original_name);
                    file_data = Some(data);
                }
                Some("chunk_strategy") => {
                    let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                    chunk_strategy = ChunkStrategy::from_str(value.trim())
                        .map_err(|_| StatusCode::BAD_REQUEST)?;
                }
                _ => {}
            }
        }

        let (Some(file_name), Some(file_data)) = (file_name, file_data) else {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UploadResponseDto>::error(
                    "NO_FILE_PROVIDED".to_string(),
                    "No file provided in the request".to_string(),
                    None,
                )),
            ));
        };

        let request = IngestDocumentRequest {
            file_name,
            file_data,
            chunk_strategy,
        };

        match handler.ingest_use_case.execute(request).await {
            Ok(response) => {
                let dto = UploadResponseDto::from(response);
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(e) => {
                let (status, code) = match &e {
                    IngestDocumentError::ValidationError(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
                    }
                    IngestDocumentError::UnsupportedFormat(_) => {
                        (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT")
                    }
                    IngestDocumentError::EmptyDocument => {
                        (StatusCode::BAD_REQUEST, "EMPTY_DOCUMENT")
                    }
                    IngestDocumentError::DuplicateDocument(_) => {
                        (StatusCode::CONFLICT, "DUPLICATE_DOCUMENT")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "INGESTION_FAILED"),
                };

                Ok((
                    status,
                    Json(ApiResponse::error(code.to_string(), e.to_string(), None)),
                ))
            }
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        Query(pagination): Query<PaginationDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListDocumentsRequest {
            skip: pagination.skip,
            limit: pagination.limit,
        };

        match handler.list_documents_use_case.execute(request).await {
            Ok(response) => {
                let documents: Vec<DocumentResponseDto> = response
                    .documents
                    .into_iter()
                    .map(DocumentResponseDto::from)
                    .collect();

                let dto = DocumentListResponseDto {
                    documents,
                    meta: PaginationMetaDto {
                        offset: response.skip,
                        limit: response.limit,
                        total: response.total_count,
                    },
                };

                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DocumentListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
