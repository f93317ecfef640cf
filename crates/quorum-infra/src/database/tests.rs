use std::sync::Arc;

use chrono::TimeDelta;
use uuid::Uuid;

use quorum_core::activity::{ActivityTracker, POSTS_PER_PAGE};
use quorum_core::domain::{Board, Post, Topic, User};
use quorum_core::error::DomainError;
use quorum_core::ports::{PostRepository, Repository};
use quorum_core::validation::{NewTopicInput, ReplyInput};

use super::memory::MemoryStore;
use crate::session::InMemorySessionStore;

fn tracker(store: &MemoryStore) -> ActivityTracker {
    ActivityTracker::new(
        Arc::new(store.boards()),
        Arc::new(store.topics()),
        Arc::new(store.posts()),
        Arc::new(InMemorySessionStore::new()),
    )
}

async fn seed_user(store: &MemoryStore, username: &str) -> User {
    let user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "hash".to_string(),
    );
    store.users().save(user).await.unwrap()
}

async fn seed_board(store: &MemoryStore, name: &str) -> Board {
    store
        .boards()
        .save(Board::new(name.to_string(), format!("{name} discussion")))
        .await
        .unwrap()
}

/// Seed a topic with its opening post, `age` minutes in the past.
async fn seed_topic(
    store: &MemoryStore,
    board: &Board,
    starter: &User,
    subject: &str,
    age: i64,
) -> Topic {
    let mut topic = Topic::new(board.id, starter.id, subject.to_string());
    topic.last_updated -= TimeDelta::minutes(age);
    let topic = store.topics().save(topic).await.unwrap();
    store
        .posts()
        .save(Post::new(topic.id, starter.id, format!("{subject} opening post")))
        .await
        .unwrap();
    topic
}

#[tokio::test]
async fn topics_list_newest_activity_first() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;

    seed_topic(&store, &board, &user, "oldest", 30).await;
    seed_topic(&store, &board, &user, "newest", 1).await;
    seed_topic(&store, &board, &user, "middle", 10).await;

    let page = tracker(&store).list_topics(board.id, 1).await.unwrap();

    let subjects: Vec<_> = page.topics.iter().map(|s| s.topic.subject.as_str()).collect();
    assert_eq!(subjects, vec!["newest", "middle", "oldest"]);
    assert_eq!(page.board.id, board.id);
}

#[tokio::test]
async fn reply_count_excludes_opening_post() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let t = tracker(&store);
    for i in 0..2 {
        t.append_reply(
            board.id,
            topic.id,
            user.id,
            ReplyInput {
                message: format!("reply {i}"),
            },
        )
        .await
        .unwrap();
    }

    let page = t.list_topics(board.id, 1).await.unwrap();
    assert_eq!(page.topics.len(), 1);
    assert_eq!(page.topics[0].replies, 2);
}

#[tokio::test]
async fn list_topics_unknown_board_is_not_found() {
    let store = MemoryStore::new();

    let err = tracker(&store).list_topics(Uuid::new_v4(), 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn repeat_views_from_one_session_count_once() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let t = tracker(&store);
    t.record_view("session-a", board.id, topic.id).await.unwrap();
    let after_second = t.record_view("session-a", board.id, topic.id).await.unwrap();

    assert_eq!(after_second.views, 1);
}

#[tokio::test]
async fn distinct_sessions_each_count() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let t = tracker(&store);
    t.record_view("session-a", board.id, topic.id).await.unwrap();
    let after_b = t.record_view("session-b", board.id, topic.id).await.unwrap();

    assert_eq!(after_b.views, 2);
}

#[tokio::test]
async fn view_of_topic_outside_board_is_not_found() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let other = seed_board(&store, "Random").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let err = tracker(&store)
        .record_view("session-a", other.id, topic.id)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    // The counter must not have moved.
    let stored = store.topics().find_by_id(topic.id).await.unwrap().unwrap();
    assert_eq!(stored.views, 0);
}

#[tokio::test]
async fn empty_reply_is_rejected_and_creates_nothing() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let err = tracker(&store)
        .append_reply(
            board.id,
            topic.id,
            user.id,
            ReplyInput {
                message: "  ".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Invalid(_)));
    assert_eq!(store.posts().count_by_topic(topic.id).await.unwrap(), 1);
}

#[tokio::test]
async fn reply_bumps_last_updated_and_reports_landing_page() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 60).await;
    let before = store
        .topics()
        .find_by_id(topic.id)
        .await
        .unwrap()
        .unwrap()
        .last_updated;

    let t = tracker(&store);
    // Posts 2..=15 still fit on the first page.
    for i in 0..(POSTS_PER_PAGE - 1) {
        let (_, page) = t
            .append_reply(
                board.id,
                topic.id,
                user.id,
                ReplyInput {
                    message: format!("reply {i}"),
                },
            )
            .await
            .unwrap();
        assert_eq!(page, 1);
    }

    // The 16th post opens page 2.
    let (post, page) = t
        .append_reply(
            board.id,
            topic.id,
            user.id,
            ReplyInput {
                message: "the one that rolls over".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(page, 2);
    assert_eq!(post.topic_id, topic.id);

    let after = store
        .topics()
        .find_by_id(topic.id)
        .await
        .unwrap()
        .unwrap()
        .last_updated;
    assert!(after > before);
}

#[tokio::test]
async fn start_topic_creates_opening_post() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;

    let t = tracker(&store);
    let (topic, post) = t
        .start_topic(
            board.id,
            user.id,
            NewTopicInput {
                subject: "Hello".to_string(),
                message: "First!".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(post.topic_id, topic.id);
    assert_eq!(topic.views, 0);

    let page = t.list_topics(board.id, 1).await.unwrap();
    assert_eq!(page.topics[0].replies, 0);
}

#[tokio::test]
async fn topic_posts_pages_clamp_into_range() {
    let store = MemoryStore::new();
    let user = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &user, "Hello", 5).await;

    let t = tracker(&store);
    for i in 0..20 {
        t.append_reply(
            board.id,
            topic.id,
            user.id,
            ReplyInput {
                message: format!("reply {i}"),
            },
        )
        .await
        .unwrap();
    }

    // 21 posts at 15/page = 2 pages; a wild page number lands on the last.
    let page = t.topic_posts(board.id, topic.id, 99).await.unwrap();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.posts.len(), 6);

    // Page 0 falls back to the first page.
    let first = t.topic_posts(board.id, topic.id, 0).await.unwrap();
    assert_eq!(first.page, 1);
    assert_eq!(first.posts.len(), POSTS_PER_PAGE as usize);
}

#[tokio::test]
async fn editing_a_foreign_post_is_not_found() {
    let store = MemoryStore::new();
    let author = seed_user(&store, "john").await;
    let intruder = seed_user(&store, "jane").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &author, "Hello", 5).await;

    let t = tracker(&store);
    let (post, _) = t
        .append_reply(
            board.id,
            topic.id,
            author.id,
            ReplyInput {
                message: "original".to_string(),
            },
        )
        .await
        .unwrap();

    let err = t
        .edit_post(
            post.id,
            intruder.id,
            ReplyInput {
                message: "defaced".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let stored = store.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.message, "original");
    assert!(stored.updated_by.is_none());
}

#[tokio::test]
async fn owner_edit_stamps_editor_and_time() {
    let store = MemoryStore::new();
    let author = seed_user(&store, "john").await;
    let board = seed_board(&store, "General").await;
    let topic = seed_topic(&store, &board, &author, "Hello", 5).await;

    let t = tracker(&store);
    let (post, _) = t
        .append_reply(
            board.id,
            topic.id,
            author.id,
            ReplyInput {
                message: "original".to_string(),
            },
        )
        .await
        .unwrap();

    let edited = t
        .edit_post(
            post.id,
            author.id,
            ReplyInput {
                message: "revised".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.message, "revised");
    assert_eq!(edited.updated_by, Some(author.id));
    assert!(edited.updated_at.is_some());
}

#[cfg(feature = "postgres")]
mod pg {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use quorum_core::ports::TopicRepository;

    use crate::database::entity::topic;
    use crate::database::pg_repo::PgTopicRepository;

    fn topic_model(board_id: Uuid, views: i64) -> topic::Model {
        topic::Model {
            id: Uuid::new_v4(),
            board_id,
            subject: "Hello".to_owned(),
            starter_id: Uuid::new_v4(),
            views,
            last_updated: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_topic_in_board() {
        let board_id = Uuid::new_v4();
        let model = topic_model(board_id, 3);
        let topic_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PgTopicRepository::new(db);

        let found = repo.find_in_board(board_id, topic_id).await.unwrap();

        let topic = found.expect("topic should be found");
        assert_eq!(topic.id, topic_id);
        assert_eq!(topic.views, 3);
    }

    #[tokio::test]
    async fn test_increment_views_updates_and_refetches() {
        let board_id = Uuid::new_v4();
        let model = topic_model(board_id, 8);
        let topic_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PgTopicRepository::new(db);

        let topic = repo.increment_views(topic_id).await.unwrap();
        assert_eq!(topic.views, 8);
    }
}
