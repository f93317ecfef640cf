use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a single message within a topic.
///
/// The first post of a topic carries its opening message; subsequent posts
/// are replies. `updated_by`/`updated_at` are set only when a post is edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub message: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(topic_id: Uuid, created_by: Uuid, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic_id,
            message,
            created_by,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    /// Replace the message, stamping the editor and edit time.
    pub fn apply_edit(&mut self, editor: Uuid, message: String) {
        self.message = message;
        self.updated_by = Some(editor);
        self.updated_at = Some(Utc::now());
    }
}
