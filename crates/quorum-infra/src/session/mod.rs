//! Session store implementations.
//!
//! The store carries visitor-session state: viewed-topic flags and
//! password-reset tokens, all with TTLs.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemorySessionStore;

#[cfg(feature = "redis")]
pub use redis::{RedisConfig, RedisSessionStore};
