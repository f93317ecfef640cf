//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to update the caller's account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Request to change the caller's password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request to start a password reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Request to complete a password reset with the issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

/// Request to create a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBoardRequest {
    pub name: String,
    pub description: String,
}

/// Request to start a topic: subject plus opening message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTopicRequest {
    pub subject: String,
    pub message: String,
}

/// Request to reply to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

/// Request to edit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostRequest {
    pub message: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

/// Response containing a topic with its listing annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicResponse {
    pub id: String,
    pub board_id: String,
    pub subject: String,
    pub starter_id: String,
    pub views: i64,
    pub replies: u64,
    pub last_updated: String,
}

/// Response containing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub topic_id: String,
    pub message: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_by: Option<String>,
    pub updated_at: Option<String>,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
}

/// A board's topic listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardTopicsResponse {
    pub board: BoardResponse,
    pub topics: Paginated<TopicResponse>,
}

/// A topic's posts page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPostsResponse {
    pub topic: TopicResponse,
    pub posts: Paginated<PostResponse>,
}

/// A freshly started topic together with its opening post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCreatedResponse {
    pub topic: TopicResponse,
    pub post: PostResponse,
}

/// A freshly created reply plus the page it landed on, so the client can
/// jump straight to its anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyCreatedResponse {
    pub post: PostResponse,
    pub page: u64,
}
