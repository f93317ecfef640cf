//! Board activity rules: topic ordering with derived reply counts,
//! idempotent per-session view counting, and page-anchored reply placement.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Board, Post, Topic, TopicSummary};
use crate::error::DomainError;
use crate::ports::{BoardRepository, PostRepository, SessionStore, TopicRepository};
use crate::validation::{NewTopicInput, ReplyInput};

/// Posts shown per topic page. A reply's landing page is derived from this.
pub const POSTS_PER_PAGE: u64 = 15;

/// Topics shown per board page.
pub const TOPICS_PER_PAGE: u64 = 16;

/// Lifetime of a visitor session and of its viewed flags.
pub const SESSION_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// One page of a board's topic listing.
#[derive(Debug, Clone)]
pub struct TopicPage {
    pub board: Board,
    pub topics: Vec<TopicSummary>,
    pub page: u64,
    pub total_pages: u64,
}

/// One page of a topic's posts, oldest first.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub topic: Topic,
    pub posts: Vec<Post>,
    pub page: u64,
    pub total_pages: u64,
    /// Posts in the whole topic, opening post included.
    pub total_posts: u64,
}

/// The board activity component.
///
/// Holds the persistence and session ports and enforces the listing,
/// view-counting, and reply-placement rules. One call per request; any
/// storage failure propagates to the caller unchanged.
#[derive(Clone)]
pub struct ActivityTracker {
    boards: Arc<dyn BoardRepository>,
    topics: Arc<dyn TopicRepository>,
    posts: Arc<dyn PostRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl ActivityTracker {
    pub fn new(
        boards: Arc<dyn BoardRepository>,
        topics: Arc<dyn TopicRepository>,
        posts: Arc<dyn PostRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            boards,
            topics,
            posts,
            sessions,
        }
    }

    /// List a board's topics ordered by `last_updated` descending, each
    /// annotated with `replies = post_count - 1`. Read-only.
    pub async fn list_topics(&self, board_id: Uuid, page: u64) -> Result<TopicPage, DomainError> {
        let board = self
            .boards
            .find_by_id(board_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", board_id))?;

        let total = self.topics.count_by_board(board_id).await?;
        let total_pages = page_count(total, TOPICS_PER_PAGE);
        let page = clamp_page(page, total_pages);

        let rows = self
            .topics
            .list_by_board(board_id, (page - 1) * TOPICS_PER_PAGE, TOPICS_PER_PAGE)
            .await?;

        let topics = rows
            .into_iter()
            .map(|(topic, post_count)| TopicSummary {
                topic,
                // The opening post is not a reply.
                replies: post_count.saturating_sub(1),
            })
            .collect();

        Ok(TopicPage {
            board,
            topics,
            page,
            total_pages,
        })
    }

    /// Start a new topic in a board, creating the topic and its opening post.
    pub async fn start_topic(
        &self,
        board_id: Uuid,
        author: Uuid,
        input: NewTopicInput,
    ) -> Result<(Topic, Post), DomainError> {
        input.validate()?;

        let board = self
            .boards
            .find_by_id(board_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Board", board_id))?;

        let topic = self
            .topics
            .save(Topic::new(board.id, author, input.subject))
            .await?;
        let post = self
            .posts
            .save(Post::new(topic.id, author, input.message))
            .await?;

        Ok((topic, post))
    }

    /// Count a topic view at most once per visitor session.
    ///
    /// The flag keyed by (session, topic) makes repeat page loads no-ops;
    /// the counter itself is bumped with an atomic storage-side increment.
    /// Returns the topic with its current view count.
    pub async fn record_view(
        &self,
        session_id: &str,
        board_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Topic, DomainError> {
        let topic = self
            .topics
            .find_in_board(board_id, topic_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Topic", topic_id))?;

        let key = viewed_key(session_id, topic_id);
        if self.sessions.exists(&key).await {
            return Ok(topic);
        }

        let topic = self.topics.increment_views(topic_id).await?;
        self.sessions.set(&key, "1", Some(SESSION_TTL)).await?;

        Ok(topic)
    }

    /// One page of a topic's posts, oldest first. Read-only.
    pub async fn topic_posts(
        &self,
        board_id: Uuid,
        topic_id: Uuid,
        page: u64,
    ) -> Result<PostPage, DomainError> {
        let topic = self
            .topics
            .find_in_board(board_id, topic_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Topic", topic_id))?;

        let total = self.posts.count_by_topic(topic_id).await?;
        let total_pages = page_count(total, POSTS_PER_PAGE);
        let page = clamp_page(page, total_pages);

        let posts = self
            .posts
            .list_by_topic(topic_id, (page - 1) * POSTS_PER_PAGE, POSTS_PER_PAGE)
            .await?;

        Ok(PostPage {
            topic,
            posts,
            page,
            total_pages,
            total_posts: total,
        })
    }

    /// Append a reply to a topic, bumping its `last_updated`.
    ///
    /// Returns the created post together with the 1-based page it lands on,
    /// so the caller can link straight to its anchor.
    pub async fn append_reply(
        &self,
        board_id: Uuid,
        topic_id: Uuid,
        author: Uuid,
        input: ReplyInput,
    ) -> Result<(Post, u64), DomainError> {
        input.validate()?;

        let mut topic = self
            .topics
            .find_in_board(board_id, topic_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Topic", topic_id))?;

        let post = self
            .posts
            .save(Post::new(topic.id, author, input.message))
            .await?;

        topic.last_updated = Utc::now();
        self.topics.save(topic).await?;

        let post_count = self.posts.count_by_topic(topic_id).await?;
        Ok((post, page_count(post_count, POSTS_PER_PAGE)))
    }

    /// Edit a post's message. The lookup is scoped to the editor's own
    /// posts, so a foreign post behaves as if it did not exist.
    pub async fn edit_post(
        &self,
        post_id: Uuid,
        editor: Uuid,
        input: ReplyInput,
    ) -> Result<Post, DomainError> {
        input.validate()?;

        let mut post = self
            .posts
            .find_owned(post_id, editor)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;

        post.apply_edit(editor, input.message);
        Ok(self.posts.save(post).await?)
    }
}

/// Number of pages needed for `total` items, never less than 1.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    if total == 0 { 1 } else { total.div_ceil(per_page) }
}

/// Clamp a requested 1-based page into range: 0 becomes the first page,
/// past-the-end becomes the last.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    requested.max(1).min(total_pages)
}

fn viewed_key(session_id: &str, topic_id: Uuid) -> String {
    format!("viewed:{session_id}:{topic_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, POSTS_PER_PAGE), 1);
        assert_eq!(page_count(1, POSTS_PER_PAGE), 1);
        assert_eq!(page_count(15, POSTS_PER_PAGE), 1);
        assert_eq!(page_count(16, POSTS_PER_PAGE), 2);
        assert_eq!(page_count(45, POSTS_PER_PAGE), 3);
    }

    #[test]
    fn clamp_page_falls_back_to_valid_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(99, 3), 3);
        // An empty listing still has one (empty) page.
        assert_eq!(clamp_page(5, 1), 1);
    }

    #[test]
    fn viewed_keys_separate_sessions_and_topics() {
        let topic_a = Uuid::new_v4();
        let topic_b = Uuid::new_v4();

        assert_ne!(viewed_key("s1", topic_a), viewed_key("s2", topic_a));
        assert_ne!(viewed_key("s1", topic_a), viewed_key("s1", topic_b));
    }
}
