use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::{ChunkStrategy, ContentHash};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub chunk_strategy: String,
    pub chunk_count: i32,
    pub vector_ids: serde_json::Value,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub chunk_strategy: String,
    pub chunk_count: i32,
    pub vector_ids: serde_json::Value,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            file_name: document.file_name().to_string(),
            file_type: document.file_type().to_string(),
            chunk_strategy: document.chunk_strategy().as_str().to_string(),
            chunk_count: document.chunk_count(),
            vector_ids: serde_json::json!(document.vector_ids()),
            content_hash: document.content_hash().as_str().to_string(),
            created_at: document.created_at(),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let chunk_strategy = ChunkStrategy::from_str(&model.chunk_strategy)?;

        let vector_ids: Vec<Uuid> = serde_json::from_value(model.vector_ids)
            .map_err(|e| format!("Invalid vector id list: {}", e))?;

        let content_hash = ContentHash::new(model.content_hash)
            .map_err(|e| format!("Invalid content hash: {}", e))?;

        Ok(Document::from_stored(
            model.id,
            model.file_name,
            model.file_type,
            chunk_strategy,
            model.chunk_count,
            vector_ids,
            content_hash,
            model.created_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trip() {
        let document = Document::new(
            "report.pdf".to_string(),
            "pdf".to_string(),
            ChunkStrategy::Paragraph,
            3,
            vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
            ContentHash::from_bytes(b"report"),
        );

        let row = NewDocumentModel::from(&document);
        let model = DocumentModel {
            id: row.id,
            file_name: row.file_name,
            file_type: row.file_type,
            chunk_strategy: row.chunk_strategy,
            chunk_count: row.chunk_count,
            vector_ids: row.vector_ids,
            content_hash: row.content_hash,
            created_at: row.created_at,
        };

        let restored = Document::try_from(model).unwrap();
        assert_eq!(restored, document);
    }
}
