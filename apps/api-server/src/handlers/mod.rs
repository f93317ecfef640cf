//! HTTP handlers and route configuration.

mod auth;
mod boards;
mod health;
mod posts;
mod topics;

use actix_web::web;

use quorum_core::domain::{Board, Post, Topic, User};
use quorum_shared::dto::{BoardResponse, PostResponse, TopicResponse, UserResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/me", web::put().to(auth::update_account))
                    .route("/password", web::put().to(auth::change_password))
                    .route(
                        "/password-reset",
                        web::post().to(auth::request_password_reset),
                    )
                    .route(
                        "/password-reset/confirm",
                        web::post().to(auth::confirm_password_reset),
                    ),
            )
            // Board routes
            .service(
                web::scope("/boards")
                    .route("", web::get().to(boards::list_boards))
                    .route("", web::post().to(boards::create_board))
                    .route("/{board_id}/topics", web::get().to(topics::list_topics))
                    .route("/{board_id}/topics", web::post().to(topics::create_topic))
                    .route(
                        "/{board_id}/topics/{topic_id}",
                        web::get().to(topics::topic_posts),
                    )
                    .route(
                        "/{board_id}/topics/{topic_id}/replies",
                        web::post().to(posts::create_reply),
                    ),
            )
            // Post routes
            .service(web::scope("/posts").route("/{post_id}", web::put().to(posts::edit_post))),
    );
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

pub(crate) fn board_response(board: &Board) -> BoardResponse {
    BoardResponse {
        id: board.id.to_string(),
        name: board.name.clone(),
        description: board.description.clone(),
        created_at: board.created_at.to_rfc3339(),
    }
}

pub(crate) fn topic_response(topic: &Topic, replies: u64) -> TopicResponse {
    TopicResponse {
        id: topic.id.to_string(),
        board_id: topic.board_id.to_string(),
        subject: topic.subject.clone(),
        starter_id: topic.starter_id.to_string(),
        views: topic.views,
        replies,
        last_updated: topic.last_updated.to_rfc3339(),
    }
}

pub(crate) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        topic_id: post.topic_id.to_string(),
        message: post.message.clone(),
        created_by: post.created_by.to_string(),
        created_at: post.created_at.to_rfc3339(),
        updated_by: post.updated_by.map(|id| id.to_string()),
        updated_at: post.updated_at.map(|at| at.to_rfc3339()),
    }
}
