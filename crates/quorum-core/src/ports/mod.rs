//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod session;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    BoardRepository, PostRepository, Repository, TopicRepository, UserRepository,
};
pub use session::{SessionStore, SessionStoreError};
