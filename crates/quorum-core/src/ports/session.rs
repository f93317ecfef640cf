use async_trait::async_trait;
use std::time::Duration;

/// Session store - a small key-value capability over visitor-session state.
///
/// The board uses it for exactly two things: the per-(session, topic)
/// viewed flag that keeps repeat page loads from inflating view counters,
/// and short-lived password-reset tokens. Entries expire with their TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a value from the store.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value with optional TTL.
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), SessionStoreError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), SessionStoreError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> bool;
}

/// Session store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
