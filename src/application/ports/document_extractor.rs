use async_trait::async_trait;

#[derive(Debug)]
pub enum DocumentExtractionError {
    UnsupportedFormat(String),
    EmptyDocument,
    CorruptedFile(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            DocumentExtractionError::EmptyDocument => {
                write!(f, "No readable text found in document")
            }
            DocumentExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            DocumentExtractionError::ExtractionFailed(msg) => {
                write!(f, "Extraction failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

/// Text extraction from uploaded file bytes. `file_type` is the lowercase
/// extension-derived type ("pdf", "txt").
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        file_type: &str,
    ) -> Result<String, DocumentExtractionError>;

    fn can_extract(&self, file_type: &str) -> bool;
}
