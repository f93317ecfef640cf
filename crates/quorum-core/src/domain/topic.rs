use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic entity - a discussion thread started by a user within a board.
///
/// `views` counts distinct visitor sessions and never decreases.
/// `last_updated` moves forward whenever a reply is appended; boards list
/// their topics by it, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub board_id: Uuid,
    pub subject: String,
    pub starter_id: Uuid,
    pub views: i64,
    pub last_updated: DateTime<Utc>,
}

impl Topic {
    pub fn new(board_id: Uuid, starter_id: Uuid, subject: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            subject,
            starter_id,
            views: 0,
            last_updated: Utc::now(),
        }
    }
}

/// A topic annotated with its reply count, as shown in board listings.
///
/// The opening post is not a reply, so `replies` is one less than the
/// topic's post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: Topic,
    pub replies: u64,
}
