use std::sync::Arc;

use crate::domain::entities::Document;
use crate::domain::repositories::DocumentRepository;

#[derive(Debug)]
pub enum ListDocumentsError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

#[derive(Debug, Clone)]
pub struct ListDocumentsRequest {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListDocumentsResponse {
    pub documents: Vec<Document>,
    pub total_count: i64,
    pub skip: i64,
    pub limit: i64,
}

pub struct ListDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(document_repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            document_repository,
        }
    }

    pub async fn execute(
        &self,
        request: ListDocumentsRequest,
    ) -> Result<ListDocumentsResponse, ListDocumentsError> {
        let skip = request.skip.unwrap_or(0);
        let limit = request.limit.unwrap_or(20);

        if skip < 0 || limit <= 0 || limit > 100 {
            return Err(ListDocumentsError::ValidationError(
                "skip must be >= 0 and limit between 1 and 100".to_string(),
            ));
        }

        let documents = self
            .document_repository
            .find_all(skip, limit)
            .await
            .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;

        let total_count = self
            .document_repository
            .count()
            .await
            .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;

        Ok(ListDocumentsResponse {
            documents,
            total_count,
            skip,
            limit,
        })
    }
}
