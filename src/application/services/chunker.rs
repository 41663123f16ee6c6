use std::sync::OnceLock;

use regex::Regex;

use crate::domain::value_objects::ChunkStrategy;

fn paragraph_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"))
}

/// Splits extracted document text into ordered retrieval chunks.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_words: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self { max_words: 250 }
    }
}

impl Chunker {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(1),
        }
    }

    /// Ordered chunks for the given strategy. Empty or whitespace-only input
    /// yields zero chunks; callers treat that as an empty document.
    pub fn chunk(&self, text: &str, strategy: ChunkStrategy) -> Vec<String> {
        match strategy {
            ChunkStrategy::Fixed => self.fixed_chunks(text),
            ChunkStrategy::Paragraph => self.paragraph_chunks(text),
        }
    }

    /// Word-bounded spans of at most `max_words` words. Never splits inside a
    /// word; the final span may be shorter.
    fn fixed_chunks(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();

        words
            .chunks(self.max_words)
            .map(|span| span.join(" "))
            .collect()
    }

    /// One chunk per blank-line-delimited paragraph. Consecutive blank lines
    /// collapse to a single boundary; empty paragraphs are discarded.
    fn paragraph_chunks(&self, text: &str) -> Vec<String> {
        paragraph_boundary()
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_respects_word_bound() {
        let chunker = Chunker::new(10);
        let text = "word ".repeat(57);
        let chunks = chunker.chunk(&text, ChunkStrategy::Fixed);

        assert_eq!(chunks.len(), 6);
        for chunk in &chunks {
            assert!(chunk.split_whitespace().count() <= 10);
        }
        assert_eq!(chunks.last().unwrap().split_whitespace().count(), 7);
    }

    #[test]
    fn test_fixed_preserves_word_sequence() {
        let chunker = Chunker::new(4);
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let chunks = chunker.chunk(text, ChunkStrategy::Fixed);

        let reconstructed: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(reconstructed, original);
    }

    #[test]
    fn test_fixed_short_input_is_single_chunk() {
        let chunker = Chunker::default();
        let text = "a fifty word document would still fit one chunk";
        let chunks = chunker.chunk(text, ChunkStrategy::Fixed);

        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_paragraph_one_chunk_per_paragraph() {
        let chunker = Chunker::default();
        let text = "First paragraph here.\n\nSecond paragraph.\n\n\n\nThird, after extra blanks.";
        let chunks = chunker.chunk(text, ChunkStrategy::Paragraph);

        assert_eq!(
            chunks,
            vec![
                "First paragraph here.".to_string(),
                "Second paragraph.".to_string(),
                "Third, after extra blanks.".to_string(),
            ]
        );
    }

    #[test]
    fn test_paragraph_trims_and_discards_empty() {
        let chunker = Chunker::default();
        let text = "  leading spaces\n\n   \n\ntrailing spaces  \n";
        let chunks = chunker.chunk(text, ChunkStrategy::Paragraph);

        assert_eq!(
            chunks,
            vec!["leading spaces".to_string(), "trailing spaces".to_string()]
        );
    }

    #[test]
    fn test_empty_input_yields_zero_chunks() {
        let chunker = Chunker::default();

        assert!(chunker.chunk("", ChunkStrategy::Fixed).is_empty());
        assert!(chunker.chunk("   \n\n\t ", ChunkStrategy::Fixed).is_empty());
        assert!(chunker.chunk("", ChunkStrategy::Paragraph).is_empty());
        assert!(
            chunker
                .chunk("   \n\n\t ", ChunkStrategy::Paragraph)
                .is_empty()
        );
    }
}
