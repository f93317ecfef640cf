//! Application state - shared across all handlers.

use std::sync::Arc;

use quorum_core::activity::ActivityTracker;
use quorum_core::ports::{
    BoardRepository, PostRepository, SessionStore, TopicRepository, UserRepository,
};
use quorum_infra::database::{
    MemoryStore, PgBoardRepository, PgPostRepository, PgTopicRepository, PgUserRepository,
};
use quorum_infra::session::{InMemorySessionStore, RedisSessionStore};

use crate::config::AppConfig;

type Repos = (
    Arc<dyn UserRepository>,
    Arc<dyn BoardRepository>,
    Arc<dyn TopicRepository>,
    Arc<dyn PostRepository>,
);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub boards: Arc<dyn BoardRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub tracker: ActivityTracker,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let sessions = init_sessions().await;
        let (users, boards, topics, posts) = init_repos(config).await;

        let tracker =
            ActivityTracker::new(boards.clone(), topics, posts, sessions.clone());

        tracing::info!("Application state initialized");

        Self {
            users,
            boards,
            sessions,
            tracker,
        }
    }
}

/// Redis-backed sessions when configured, in-memory otherwise.
async fn init_sessions() -> Arc<dyn SessionStore> {
    if std::env::var("REDIS_URL").is_ok() {
        match RedisSessionStore::from_env().await {
            Ok(store) => return Arc::new(store),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to Redis: {}. Using in-memory session store.",
                    e
                );
            }
        }
    } else {
        tracing::info!("REDIS_URL not set. Using in-memory session store.");
    }
    Arc::new(InMemorySessionStore::new())
}

/// Postgres repositories when a database is configured, in-memory otherwise.
async fn init_repos(config: &AppConfig) -> Repos {
    if let Some(db_config) = config.database.as_ref() {
        match quorum_infra::database::connect(db_config).await {
            Ok(conn) => {
                return (
                    Arc::new(PgUserRepository::new(conn.clone())),
                    Arc::new(PgBoardRepository::new(conn.clone())),
                    Arc::new(PgTopicRepository::new(conn.clone())),
                    Arc::new(PgPostRepository::new(conn)),
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory storage.",
                    e
                );
            }
        }
    } else {
        tracing::warn!("DATABASE_URL not set. Running with in-memory storage.");
    }

    let store = MemoryStore::new();
    (
        Arc::new(store.users()),
        Arc::new(store.boards()),
        Arc::new(store.topics()),
        Arc::new(store.posts()),
    )
}
