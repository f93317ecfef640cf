//! In-memory session store - used as fallback when Redis is unavailable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quorum_core::ports::{SessionStore, SessionStoreError};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory session store over a HashMap with an async RwLock.
///
/// Entries expire lazily on read. State is lost on process restart, which
/// for view flags only means a visitor may count once more.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &Entry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if Self::is_expired(entry) {
            drop(entries);
            let mut entries = self.entries.write().await;
            entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.write().await;

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: ttl.map(|d| Instant::now() + d),
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemorySessionStore::new();
        store.set("viewed:s1:t1", "1", None).await.unwrap();
        assert_eq!(store.get("viewed:s1:t1").await, Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemorySessionStore::new();
        store.set("viewed:s1:t1", "1", None).await.unwrap();
        store.delete("viewed:s1:t1").await.unwrap();
        assert_eq!(store.get("viewed:s1:t1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let store = InMemorySessionStore::new();
        store
            .set("viewed:s1:t1", "1", Some(Duration::from_millis(10)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!store.exists("viewed:s1:t1").await);
    }
}
