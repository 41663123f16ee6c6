use std::sync::Arc;

use crate::application::ports::SessionCache;
use crate::domain::entities::{BookingDraft, Turn};

#[derive(Debug)]
pub enum SessionMemoryError {
    CacheError(String),
    CodecError(String),
}

impl std::fmt::Display for SessionMemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMemoryError::CacheError(msg) => write!(f, "Cache error: {}", msg),
            SessionMemoryError::CodecError(msg) => write!(f, "Codec error: {}", msg),
        }
    }
}

impl std::error::Error for SessionMemoryError {}

/// Session state over the external cache: the append-only turn log and the
/// in-progress booking draft. Nothing is held in process memory between
/// requests.
pub struct SessionMemory {
    cache: Arc<dyn SessionCache>,
}

impl SessionMemory {
    pub fn new(cache: Arc<dyn SessionCache>) -> Self {
        Self { cache }
    }

    fn history_key(session_id: &str) -> String {
        format!("session:{}:history", session_id)
    }

    fn booking_key(session_id: &str) -> String {
        format!("session:{}:booking", session_id)
    }

    /// Append one completed exchange. Exactly one cache entry per call.
    pub async fn append_turn(
        &self,
        session_id: &str,
        turn: &Turn,
    ) -> Result<(), SessionMemoryError> {
        let encoded = serde_json::to_string(turn)
            .map_err(|e| SessionMemoryError::CodecError(e.to_string()))?;

        self.cache
            .list_append(&Self::history_key(session_id), &encoded)
            .await
            .map_err(|e| SessionMemoryError::CacheError(e.to_string()))
    }

    /// The most recent `max_turns` exchanges in chronological order, or the
    /// full history if shorter. Entries that no longer decode (e.g. written
    /// by an older deployment) are skipped.
    pub async fn recent_turns(
        &self,
        session_id: &str,
        max_turns: usize,
    ) -> Result<Vec<Turn>, SessionMemoryError> {
        let entries = self
            .cache
            .list_tail(&Self::history_key(session_id), max_turns)
            .await
            .map_err(|e| SessionMemoryError::CacheError(e.to_string()))?;

        let mut turns = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_str::<Turn>(&entry) {
                Ok(turn) => turns.push(turn),
                Err(e) => {
                    tracing::warn!("Skipping undecodable history entry: {}", e);
                }
            }
        }

        Ok(turns)
    }

    pub async fn load_draft(
        &self,
        session_id: &str,
    ) -> Result<Option<BookingDraft>, SessionMemoryError> {
        let raw = self
            .cache
            .get(&Self::booking_key(session_id))
            .await
            .map_err(|e| SessionMemoryError::CacheError(e.to_string()))?;

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SessionMemoryError::CodecError(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn store_draft(
        &self,
        session_id: &str,
        draft: &BookingDraft,
    ) -> Result<(), SessionMemoryError> {
        let encoded = serde_json::to_string(draft)
            .map_err(|e| SessionMemoryError::CodecError(e.to_string()))?;

        self.cache
            .set(&Self::booking_key(session_id), &encoded)
            .await
            .map_err(|e| SessionMemoryError::CacheError(e.to_string()))
    }

    pub async fn clear_draft(&self, session_id: &str) -> Result<(), SessionMemoryError> {
        self.cache
            .delete(&Self::booking_key(session_id))
            .await
            .map_err(|e| SessionMemoryError::CacheError(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::application::ports::session_cache::SessionCacheError;
    use crate::domain::entities::BookingFields;

    /// In-memory stand-in for the Redis cache.
    #[derive(Default)]
    pub(crate) struct InMemorySessionCache {
        lists: Mutex<HashMap<String, Vec<String>>>,
        values: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SessionCache for InMemorySessionCache {
        async fn list_append(&self, key: &str, entry: &str) -> Result<(), SessionCacheError> {
            self.lists
                .lock()
                .unwrap()
                .entry(key.to_string())
                .or_default()
                .push(entry.to_string());
            Ok(())
        }

        async fn list_tail(
            &self,
            key: &str,
            max_entries: usize,
        ) -> Result<Vec<String>, SessionCacheError> {
            let lists = self.lists.lock().unwrap();
            let entries = lists.get(key).cloned().unwrap_or_default();
            let start = entries.len().saturating_sub(max_entries);
            Ok(entries[start..].to_vec())
        }

        async fn get(&self, key: &str) -> Result<Option<String>, SessionCacheError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), SessionCacheError> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), SessionCacheError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn turn(n: usize) -> Turn {
        Turn::new(format!("question {}", n), format!("answer {}", n), vec![])
    }

    #[tokio::test]
    async fn test_append_then_read_back_in_order() {
        let memory = SessionMemory::new(Arc::new(InMemorySessionCache::default()));

        for n in 0..4 {
            memory.append_turn("s1", &turn(n)).await.unwrap();
        }

        let turns = memory.recent_turns("s1", 4).await.unwrap();
        assert_eq!(turns.len(), 4);
        for (n, t) in turns.iter().enumerate() {
            assert_eq!(t.user_text(), format!("question {}", n));
        }
    }

    #[tokio::test]
    async fn test_window_keeps_most_recent_oldest_first() {
        let memory = SessionMemory::new(Arc::new(InMemorySessionCache::default()));

        for n in 0..5 {
            memory.append_turn("s1", &turn(n)).await.unwrap();
        }

        let turns = memory.recent_turns("s1", 3).await.unwrap();
        let texts: Vec<&str> = turns.iter().map(|t| t.user_text()).collect();
        assert_eq!(texts, vec!["question 2", "question 3", "question 4"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let memory = SessionMemory::new(Arc::new(InMemorySessionCache::default()));

        memory.append_turn("s1", &turn(1)).await.unwrap();
        let other = memory.recent_turns("s2", 10).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_draft_round_trip_and_clear() {
        let memory = SessionMemory::new(Arc::new(InMemorySessionCache::default()));

        assert!(memory.load_draft("s1").await.unwrap().is_none());

        let mut draft = BookingDraft::new();
        draft.apply(&BookingFields {
            name: Some("Sujan".to_string()),
            ..Default::default()
        });
        memory.store_draft("s1", &draft).await.unwrap();

        let loaded = memory.load_draft("s1").await.unwrap().unwrap();
        assert_eq!(loaded, draft);

        memory.clear_draft("s1").await.unwrap();
        assert!(memory.load_draft("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_entries_are_skipped() {
        let cache = Arc::new(InMemorySessionCache::default());
        cache
            .list_append("session:s1:history", "not json")
            .await
            .unwrap();

        let memory = SessionMemory::new(cache);
        memory.append_turn("s1", &turn(0)).await.unwrap();

        let turns = memory.recent_turns("s1", 10).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].user_text(), "question 0");
    }
}
