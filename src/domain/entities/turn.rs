use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chunk citation attached to an assistant answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub excerpt: String,
    pub filename: String,
}

impl SourceRef {
    const EXCERPT_CHARS: usize = 200;

    /// Build a citation from the full chunk text, keeping a bounded excerpt.
    pub fn from_chunk(text: &str, filename: &str) -> Self {
        let excerpt = if text.chars().count() > Self::EXCERPT_CHARS {
            let cut: String = text.chars().take(Self::EXCERPT_CHARS).collect();
            format!("{}...", cut.trim_end())
        } else {
            text.to_string()
        };

        Self {
            excerpt,
            filename: filename.to_string(),
        }
    }
}

/// One request/response exchange within a session, appended to the session
/// log as a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    user_text: String,
    assistant_text: String,
    sources: Vec<SourceRef>,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(user_text: String, assistant_text: String, sources: Vec<SourceRef>) -> Self {
        Self {
            user_text,
            assistant_text,
            sources,
            created_at: Utc::now(),
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn assistant_text(&self) -> &str {
        &self.assistant_text
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_is_bounded() {
        let long_text = "word ".repeat(100);
        let source = SourceRef::from_chunk(&long_text, "doc.pdf");

        assert!(source.excerpt.chars().count() <= 203); // 200 + "..."
        assert!(source.excerpt.ends_with("..."));
        assert_eq!(source.filename, "doc.pdf");
    }

    #[test]
    fn test_short_chunk_kept_verbatim() {
        let source = SourceRef::from_chunk("short chunk", "doc.txt");
        assert_eq!(source.excerpt, "short chunk");
    }

    #[test]
    fn test_turn_round_trips_through_json() {
        let turn = Turn::new(
            "what is in the report?".to_string(),
            "the report covers Q3.".to_string(),
            vec![SourceRef::from_chunk("Q3 revenue grew", "report.pdf")],
        );

        let encoded = serde_json::to_string(&turn).unwrap();
        let decoded: Turn = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, turn);
    }
}
