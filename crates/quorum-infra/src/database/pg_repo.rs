//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use quorum_core::domain::{Board, Post, Topic, User};
use quorum_core::error::RepoError;
use quorum_core::ports::{BoardRepository, PostRepository, TopicRepository, UserRepository};

use super::entity::board::{self, Entity as BoardEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::topic::{self, Entity as TopicEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::pg_base::PgBaseRepository;

/// PostgreSQL user repository.
pub type PgUserRepository = PgBaseRepository<UserEntity>;

/// PostgreSQL board repository.
pub type PgBoardRepository = PgBaseRepository<BoardEntity>;

/// PostgreSQL topic repository.
pub type PgTopicRepository = PgBaseRepository<TopicEntity>;

/// PostgreSQL post repository.
pub type PgPostRepository = PgBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part so the address never lands in logs whole
        let masked = match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{}", &local[..1], domain)
            }
            _ => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl BoardRepository for PgBoardRepository {
    async fn list_all(&self) -> Result<Vec<Board>, RepoError> {
        let result = BoardEntity::find()
            .order_by_asc(board::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Row shape for the topic listing: every topic column plus the joined
/// post count.
#[derive(Debug, FromQueryResult)]
struct TopicWithPostCount {
    id: Uuid,
    board_id: Uuid,
    subject: String,
    starter_id: Uuid,
    views: i64,
    last_updated: DateTimeWithTimeZone,
    post_count: i64,
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    async fn list_by_board(
        &self,
        board_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Topic, u64)>, RepoError> {
        // Grouping by the primary key lets Postgres carry the remaining
        // topic columns through the aggregate.
        let rows = TopicEntity::find()
            .filter(topic::Column::BoardId.eq(board_id))
            .left_join(PostEntity)
            .select_only()
            .column(topic::Column::Id)
            .column(topic::Column::BoardId)
            .column(topic::Column::Subject)
            .column(topic::Column::StarterId)
            .column(topic::Column::Views)
            .column(topic::Column::LastUpdated)
            .column_as(post::Column::Id.count(), "post_count")
            .group_by(topic::Column::Id)
            .order_by_desc(topic::Column::LastUpdated)
            .offset(offset)
            .limit(limit)
            .into_model::<TopicWithPostCount>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let topic = Topic {
                    id: row.id,
                    board_id: row.board_id,
                    subject: row.subject,
                    starter_id: row.starter_id,
                    views: row.views,
                    last_updated: row.last_updated.into(),
                };
                (topic, row.post_count as u64)
            })
            .collect())
    }

    async fn count_by_board(&self, board_id: Uuid) -> Result<u64, RepoError> {
        TopicEntity::find()
            .filter(topic::Column::BoardId.eq(board_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn find_in_board(
        &self,
        board_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Option<Topic>, RepoError> {
        let result = TopicEntity::find_by_id(topic_id)
            .filter(topic::Column::BoardId.eq(board_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn increment_views(&self, topic_id: Uuid) -> Result<Topic, RepoError> {
        // Single UPDATE so concurrent viewers serialize on the row.
        let result = TopicEntity::update_many()
            .col_expr(
                topic::Column::Views,
                Expr::col(topic::Column::Views).add(1),
            )
            .filter(topic::Column::Id.eq(topic_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        let updated = TopicEntity::find_by_id(topic_id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        updated.map(Into::into).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list_by_topic(
        &self,
        topic_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::TopicId.eq(topic_id))
            .order_by_asc(post::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_topic(&self, topic_id: Uuid) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::TopicId.eq(topic_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn find_owned(&self, post_id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(post_id)
            .filter(post::Column::CreatedBy.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
