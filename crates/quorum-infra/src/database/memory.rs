//! In-memory persistence backend.
//!
//! Used as the fallback when no database is configured, and as the backend
//! for component tests. All repository handles share one set of tables so
//! cross-entity queries (reply counts) stay consistent. Data is lost on
//! restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quorum_core::domain::{Board, Post, Topic, User};
use quorum_core::error::RepoError;
use quorum_core::ports::{
    BoardRepository, PostRepository, Repository, TopicRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    boards: HashMap<Uuid, Board>,
    topics: HashMap<Uuid, Topic>,
    posts: HashMap<Uuid, Post>,
}

/// Shared storage behind the in-memory repositories.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn boards(&self) -> InMemoryBoardRepository {
        InMemoryBoardRepository {
            store: self.clone(),
        }
    }

    pub fn topics(&self) -> InMemoryTopicRepository {
        InMemoryTopicRepository {
            store: self.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            store: self.clone(),
        }
    }
}

pub struct InMemoryUserRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;
        let clash = tables.users.values().any(|u| {
            u.id != user.id && (u.username == user.username || u.email == user.email)
        });
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.users.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

pub struct InMemoryBoardRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository<Board, Uuid> for InMemoryBoardRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.boards.get(&id).cloned())
    }

    async fn save(&self, board: Board) -> Result<Board, RepoError> {
        let mut tables = self.store.tables.write().await;
        let clash = tables
            .boards
            .values()
            .any(|b| b.id != board.id && b.name == board.name);
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .boards
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn list_all(&self) -> Result<Vec<Board>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut boards: Vec<Board> = tables.boards.values().cloned().collect();
        boards.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(boards)
    }
}

pub struct InMemoryTopicRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository<Topic, Uuid> for InMemoryTopicRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Topic>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.topics.get(&id).cloned())
    }

    async fn save(&self, topic: Topic) -> Result<Topic, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.topics.insert(topic.id, topic.clone());
        Ok(topic)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .topics
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn list_by_board(
        &self,
        board_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Topic, u64)>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut topics: Vec<Topic> = tables
            .topics
            .values()
            .filter(|t| t.board_id == board_id)
            .cloned()
            .collect();
        topics.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));

        Ok(topics
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|topic| {
                let post_count = tables
                    .posts
                    .values()
                    .filter(|p| p.topic_id == topic.id)
                    .count() as u64;
                (topic, post_count)
            })
            .collect())
    }

    async fn count_by_board(&self, board_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .topics
            .values()
            .filter(|t| t.board_id == board_id)
            .count() as u64)
    }

    async fn find_in_board(
        &self,
        board_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Option<Topic>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .topics
            .get(&topic_id)
            .filter(|t| t.board_id == board_id)
            .cloned())
    }

    async fn increment_views(&self, topic_id: Uuid) -> Result<Topic, RepoError> {
        let mut tables = self.store.tables.write().await;
        let topic = tables.topics.get_mut(&topic_id).ok_or(RepoError::NotFound)?;
        topic.views += 1;
        Ok(topic.clone())
    }
}

pub struct InMemoryPostRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_by_topic(
        &self,
        topic_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.topic_id == topic_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_topic(&self, topic_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.topic_id == topic_id)
            .count() as u64)
    }

    async fn find_owned(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .get(&post_id)
            .filter(|p| p.created_by == user_id)
            .cloned())
    }
}
