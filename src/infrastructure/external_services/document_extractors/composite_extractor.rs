use async_trait::async_trait;
use std::sync::Arc;

use super::{PdfExtractor, TextExtractor};
use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

/// Dispatches extraction to the matching format-specific extractor.
pub struct CompositeDocumentExtractor {
    pdf_extractor: Arc<PdfExtractor>,
    text_extractor: Arc<TextExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            pdf_extractor: Arc::new(PdfExtractor::new()),
            text_extractor: Arc::new(TextExtractor::new()),
        }
    }

    fn get_extractor_for_type(&self, file_type: &str) -> Option<Arc<dyn DocumentExtractor>> {
        let file_type_lower = file_type.to_lowercase();

        if self.pdf_extractor.can_extract(&file_type_lower) {
            Some(self.pdf_extractor.clone())
        } else if self.text_extractor.can_extract(&file_type_lower) {
            Some(self.text_extractor.clone())
        } else {
            None
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        file_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let extractor = self
            .get_extractor_for_type(file_type)
            .ok_or_else(|| DocumentExtractionError::UnsupportedFormat(file_type.to_string()))?;

        extractor.extract_text(data, file_type).await
    }

    fn can_extract(&self, file_type: &str) -> bool {
        self.get_extractor_for_type(file_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_type_is_unsupported() {
        let extractor = CompositeDocumentExtractor::new();
        let result = extractor.extract_text(b"data", "docx").await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::UnsupportedFormat(t)) if t == "docx"
        ));
    }

    #[tokio::test]
    async fn test_txt_routes_to_text_extractor() {
        let extractor = CompositeDocumentExtractor::new();
        let text = extractor.extract_text(b"some notes", "txt").await.unwrap();
        assert_eq!(text, "some notes");
    }
}
