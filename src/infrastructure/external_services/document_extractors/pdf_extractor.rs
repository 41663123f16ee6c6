use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::BTreeMap;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor,
};

pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    fn extract_pages(&self, doc: &Document) -> (String, Vec<String>) {
        let pages: BTreeMap<u32, (u32, u16)> = doc.get_pages();

        let extracted: Vec<Result<(u32, Vec<String>), String>> = pages
            .into_par_iter()
            .map(
                |(page_num, _): (u32, (u32, u16))| -> Result<(u32, Vec<String>), String> {
                    let text = doc.extract_text(&[page_num]).map_err(|e| {
                        format!("Failed to extract text from page {}: {}", page_num, e)
                    })?;

                    let lines: Vec<String> = text
                        .split('\n')
                        .map(|s| s.trim_end().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();

                    Ok((page_num, lines))
                },
            )
            .collect();

        let mut all_text = Vec::new();
        let mut errors = Vec::new();

        for page_result in extracted {
            match page_result {
                Ok((_, lines)) => all_text.extend(lines),
                Err(e) => errors.push(e),
            }
        }

        (all_text.join("\n"), errors)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        _file_type: &str,
    ) -> Result<String, DocumentExtractionError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&self.password).map_err(|_e| {
                DocumentExtractionError::ExtractionFailed(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        let (text, errors) = self.extract_pages(&doc);

        for error in &errors {
            tracing::warn!("PDF page extraction issue: {}", error);
        }

        if text.trim().is_empty() {
            // Image-only (scanned) PDFs land here; OCR is out of scope.
            return Err(DocumentExtractionError::EmptyDocument);
        }

        Ok(text)
    }

    fn can_extract(&self, file_type: &str) -> bool {
        file_type.eq_ignore_ascii_case("pdf")
    }
}
