//! # Quorum Infrastructure
//!
//! Concrete implementations of the ports defined in `quorum-core`.
//! This crate contains database, session-store, and authentication adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `redis` - Redis-backed session store

pub mod database;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{
    InMemoryBoardRepository, InMemoryPostRepository, InMemoryTopicRepository,
    InMemoryUserRepository, MemoryStore,
};
pub use session::InMemorySessionStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session::{RedisConfig, RedisSessionStore};
