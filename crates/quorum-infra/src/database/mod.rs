//! Persistence adapters: PostgreSQL repositories and the in-memory backend.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod pg_base;
#[cfg(feature = "postgres")]
mod pg_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryBoardRepository, InMemoryPostRepository, InMemoryTopicRepository,
    InMemoryUserRepository, MemoryStore,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use pg_base::PgBaseRepository;
#[cfg(feature = "postgres")]
pub use pg_repo::{PgBoardRepository, PgPostRepository, PgTopicRepository, PgUserRepository};

#[cfg(test)]
mod tests;
