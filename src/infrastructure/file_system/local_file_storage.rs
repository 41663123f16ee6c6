use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError};

pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    fn get_file_path(&self, document_id: Uuid) -> PathBuf {
        self.base_path.join(document_id.to_string())
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(&self, document_id: Uuid, data: &[u8]) -> Result<String, FileStorageError> {
        self.ensure_directory_exists().await?;

        let file_path = self.get_file_path(document_id);

        fs::write(&file_path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(file_path.to_string_lossy().to_string())
    }

    async fn retrieve_file(&self, document_id: Uuid) -> Result<Vec<u8>, FileStorageError> {
        let file_path = self.get_file_path(document_id);

        if !file_path.exists() {
            return Err(FileStorageError::FileNotFound(document_id.to_string()));
        }

        fs::read(&file_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    async fn delete_file(&self, document_id: Uuid) -> Result<bool, FileStorageError> {
        let file_path = self.get_file_path(document_id);

        if !file_path.exists() {
            return Ok(false);
        }

        fs::remove_file(&file_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(true)
    }
}
