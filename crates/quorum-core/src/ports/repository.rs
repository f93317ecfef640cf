use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Board, Post, Topic, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with lookup by the unique columns.
#[async_trait]
pub trait UserRepository: Repository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Board repository.
#[async_trait]
pub trait BoardRepository: Repository<Board, Uuid> {
    /// All boards, ordered by name.
    async fn list_all(&self) -> Result<Vec<Board>, RepoError>;
}

/// Topic repository.
///
/// Listing and counting are separate so callers can paginate: the listing
/// returns one page, the count covers the whole board.
#[async_trait]
pub trait TopicRepository: Repository<Topic, Uuid> {
    /// Topics of a board ordered by `last_updated` descending, each paired
    /// with its total post count (opening post included).
    async fn list_by_board(
        &self,
        board_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Topic, u64)>, RepoError>;

    async fn count_by_board(&self, board_id: Uuid) -> Result<u64, RepoError>;

    /// Find a topic scoped to its owning board.
    async fn find_in_board(
        &self,
        board_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Option<Topic>, RepoError>;

    /// Atomically bump the view counter by one, returning the updated topic.
    /// The increment must serialize concurrent writers on the storage side.
    async fn increment_views(&self, topic_id: Uuid) -> Result<Topic, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Repository<Post, Uuid> {
    /// Posts of a topic ordered by `created_at` ascending.
    async fn list_by_topic(
        &self,
        topic_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    async fn count_by_topic(&self, topic_id: Uuid) -> Result<u64, RepoError>;

    /// Find a post only if it was authored by `user_id`.
    async fn find_owned(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError>;
}
