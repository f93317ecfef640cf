//! Post handlers: replies and owner-scoped edits.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quorum_core::validation::ReplyInput;
use quorum_shared::ApiResponse;
use quorum_shared::dto::{EditPostRequest, ReplyCreatedResponse, ReplyRequest};

use crate::handlers::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/boards/{board_id}/topics/{topic_id}/replies
///
/// The response carries the page the reply landed on so the client can
/// link straight to its anchor.
pub async fn create_reply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<ReplyRequest>,
) -> AppResult<HttpResponse> {
    let (board_id, topic_id) = path.into_inner();
    let req = body.into_inner();

    let (post, page) = state
        .tracker
        .append_reply(
            board_id,
            topic_id,
            identity.user_id,
            ReplyInput {
                message: req.message,
            },
        )
        .await?;

    let body = ReplyCreatedResponse {
        post: post_response(&post),
        page,
    };

    Ok(HttpResponse::Created().json(ApiResponse::ok(body)))
}

/// PUT /api/posts/{post_id}
///
/// Only the author can edit a post; anyone else sees a 404, exactly as if
/// the post were not there.
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<EditPostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let post = state
        .tracker
        .edit_post(
            post_id,
            identity.user_id,
            ReplyInput {
                message: req.message,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&post))))
}
