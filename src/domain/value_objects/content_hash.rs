use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 hash over a document's raw bytes, used to detect duplicate uploads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn new(hash: String) -> Result<Self, String> {
        if hash.len() != 64 {
            return Err("Hash must be 64 characters long (SHA-256)".to_string());
        }

        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("Hash must contain only hexadecimal characters".to_string());
        }

        Ok(Self(hash.to_lowercase()))
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();
        Self(format!("{:x}", result))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hash() {
        let hash_str = "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3";
        let hash = ContentHash::new(hash_str.to_string()).unwrap();
        assert_eq!(hash.as_str(), hash_str);
    }

    #[test]
    fn test_invalid_hash_length() {
        assert!(ContentHash::new("deadbeef".to_string()).is_err());
    }

    #[test]
    fn test_invalid_hash_characters() {
        let hash_str = "g665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3";
        assert!(ContentHash::new(hash_str.to_string()).is_err());
    }

    #[test]
    fn test_same_bytes_same_hash() {
        let a = ContentHash::from_bytes(b"the same document");
        let b = ContentHash::from_bytes(b"the same document");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_bytes_different_hash() {
        let a = ContentHash::from_bytes(b"one document");
        let b = ContentHash::from_bytes(b"another document");
        assert_ne!(a, b);
    }
}
