use async_trait::async_trait;

#[derive(Debug)]
pub enum SessionCacheError {
    ConnectionError(String),
    OperationError(String),
    SerializationError(String),
}

impl std::fmt::Display for SessionCacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionCacheError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            SessionCacheError::OperationError(msg) => write!(f, "Operation error: {}", msg),
            SessionCacheError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionCacheError {}

/// External keyed cache backing session state. List entries are appended
/// atomically by the store; entries may expire independent of the pipeline.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Append one entry to the list at `key` (atomic, never deduplicated).
    async fn list_append(&self, key: &str, entry: &str) -> Result<(), SessionCacheError>;

    /// The most recent `max_entries` list entries in insertion order, or the
    /// whole list if shorter.
    async fn list_tail(
        &self,
        key: &str,
        max_entries: usize,
    ) -> Result<Vec<String>, SessionCacheError>;

    async fn get(&self, key: &str) -> Result<Option<String>, SessionCacheError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionCacheError>;

    async fn delete(&self, key: &str) -> Result<(), SessionCacheError>;
}
