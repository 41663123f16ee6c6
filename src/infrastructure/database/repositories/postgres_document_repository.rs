use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);

        diesel::insert_into(documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let document = Document::try_from(model)
                    .map_err(DocumentRepositoryError::ValidationError)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn find_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .filter(content_hash.eq(hash))
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let document = Document::try_from(model)
                    .map_err(DocumentRepositoryError::ValidationError)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .order(created_at.desc())
            .offset(skip)
            .limit(limit)
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let document =
                Document::try_from(model).map_err(DocumentRepositoryError::ValidationError)?;
            results.push(document);
        }

        Ok(results)
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        documents
            .count()
            .get_result(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
    }
}
