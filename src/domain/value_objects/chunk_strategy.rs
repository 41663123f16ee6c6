use serde::{Deserialize, Serialize};

/// How an uploaded document's text is split into retrieval units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Word-bounded spans of a configured maximum word count.
    Fixed,
    /// One chunk per blank-line-delimited paragraph.
    Paragraph,
}

impl ChunkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Fixed => "fixed",
            ChunkStrategy::Paragraph => "paragraph",
        }
    }
}

impl std::str::FromStr for ChunkStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(ChunkStrategy::Fixed),
            "paragraph" => Ok(ChunkStrategy::Paragraph),
            other => Err(format!(
                "Unknown chunk strategy '{}', expected 'fixed' or 'paragraph'",
                other
            )),
        }
    }
}

impl std::fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_known_strategies() {
        assert_eq!(
            ChunkStrategy::from_str("fixed").unwrap(),
            ChunkStrategy::Fixed
        );
        assert_eq!(
            ChunkStrategy::from_str("paragraph").unwrap(),
            ChunkStrategy::Paragraph
        );
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        assert!(ChunkStrategy::from_str("semantic").is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let encoded = serde_json::to_string(&ChunkStrategy::Fixed).unwrap();
        assert_eq!(encoded, "\"fixed\"");
    }
}
