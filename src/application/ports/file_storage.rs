use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub enum FileStorageError {
    FileNotFound(String),
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::FileNotFound(path) => write!(f, "File not found: {}", path),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

/// Raw upload storage, keyed by the owning document id.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store_file(&self, document_id: Uuid, data: &[u8]) -> Result<String, FileStorageError>;

    async fn retrieve_file(&self, document_id: Uuid) -> Result<Vec<u8>, FileStorageError>;

    async fn delete_file(&self, document_id: Uuid) -> Result<bool, FileStorageError>;
}
