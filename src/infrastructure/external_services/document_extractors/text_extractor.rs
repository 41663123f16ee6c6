use async_trait::async_trait;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for TextExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        _file_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let text = String::from_utf8_lossy(data).into_owned();

        if text.trim().is_empty() {
            return Err(DocumentExtractionError::EmptyDocument);
        }

        Ok(text)
    }

    fn can_extract(&self, file_type: &str) -> bool {
        file_type.eq_ignore_ascii_case("txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let extractor = TextExtractor::new();
        let text = extractor.extract_text(b"hello world", "txt").await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_whitespace_only_is_empty_document() {
        let extractor = TextExtractor::new();
        let result = extractor.extract_text(b" \n\t ", "txt").await;
        assert!(matches!(
            result,
            Err(DocumentExtractionError::EmptyDocument)
        ));
    }
}
