use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ChunkStrategy, ContentHash};

/// An ingested document. Created once during upload and never mutated;
/// the chunks themselves live only in the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    file_name: String,
    file_type: String,
    chunk_strategy: ChunkStrategy,
    chunk_count: i32,
    vector_ids: Vec<Uuid>,
    content_hash: ContentHash,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        file_name: String,
        file_type: String,
        chunk_strategy: ChunkStrategy,
        chunk_count: i32,
        vector_ids: Vec<Uuid>,
        content_hash: ContentHash,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            file_type,
            chunk_strategy,
            chunk_count,
            vector_ids,
            content_hash,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a document loaded from the relational store.
    pub fn from_stored(
        id: Uuid,
        file_name: String,
        file_type: String,
        chunk_strategy: ChunkStrategy,
        chunk_count: i32,
        vector_ids: Vec<Uuid>,
        content_hash: ContentHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            file_type,
            chunk_strategy,
            chunk_count,
            vector_ids,
            content_hash,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn chunk_strategy(&self) -> ChunkStrategy {
        self.chunk_strategy
    }

    pub fn chunk_count(&self) -> i32 {
        self.chunk_count
    }

    pub fn vector_ids(&self) -> &[Uuid] {
        &self.vector_ids
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let vector_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let document = Document::new(
            "report.pdf".to_string(),
            "pdf".to_string(),
            ChunkStrategy::Fixed,
            2,
            vector_ids.clone(),
            ContentHash::from_bytes(b"report body"),
        );

        assert_eq!(document.file_name(), "report.pdf");
        assert_eq!(document.file_type(), "pdf");
        assert_eq!(document.chunk_count(), 2);
        assert_eq!(document.vector_ids(), vector_ids.as_slice());
    }

    #[test]
    fn test_rehydration_keeps_identity() {
        let original = Document::new(
            "notes.txt".to_string(),
            "txt".to_string(),
            ChunkStrategy::Paragraph,
            1,
            vec![Uuid::new_v4()],
            ContentHash::from_bytes(b"notes"),
        );

        let restored = Document::from_stored(
            original.id(),
            original.file_name().to_string(),
            original.file_type().to_string(),
            original.chunk_strategy(),
            original.chunk_count(),
            original.vector_ids().to_vec(),
            original.content_hash().clone(),
            original.created_at(),
        );

        assert_eq!(restored, original);
    }
}
