//! Topic handlers: board listings, new topics, and the topic view itself.

use actix_web::cookie::{Cookie, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quorum_core::activity::SESSION_TTL;
use quorum_core::validation::NewTopicInput;
use quorum_shared::ApiResponse;
use quorum_shared::dto::{
    BoardTopicsResponse, NewTopicRequest, Paginated, TopicCreatedResponse, TopicPostsResponse,
};

use crate::handlers::{board_response, post_response, topic_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::session::{SESSION_COOKIE, ViewerSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

/// GET /api/boards/{board_id}/topics
///
/// Topics ordered by latest activity, annotated with reply counts.
pub async fn list_topics(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let board_id = path.into_inner();
    let page = query.page.unwrap_or(1);

    let listing = state.tracker.list_topics(board_id, page).await?;

    let body = BoardTopicsResponse {
        board: board_response(&listing.board),
        topics: Paginated {
            items: listing
                .topics
                .iter()
                .map(|s| topic_response(&s.topic, s.replies))
                .collect(),
            page: listing.page,
            total_pages: listing.total_pages,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/boards/{board_id}/topics
pub async fn create_topic(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<NewTopicRequest>,
) -> AppResult<HttpResponse> {
    let board_id = path.into_inner();
    let req = body.into_inner();

    let (topic, post) = state
        .tracker
        .start_topic(
            board_id,
            identity.user_id,
            NewTopicInput {
                subject: req.subject,
                message: req.message,
            },
        )
        .await?;

    tracing::info!(user = %identity.username, topic = %topic.id, "Topic started");

    let body = TopicCreatedResponse {
        topic: topic_response(&topic, 0),
        post: post_response(&post),
    };

    Ok(HttpResponse::Created().json(ApiResponse::ok(body)))
}

/// GET /api/boards/{board_id}/topics/{topic_id}
///
/// One page of the topic's posts. The view is counted at most once per
/// visitor session; a fresh session gets its cookie set here.
pub async fn topic_posts(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    query: web::Query<PageQuery>,
    session: ViewerSession,
) -> AppResult<HttpResponse> {
    let (board_id, topic_id) = path.into_inner();
    let page = query.page.unwrap_or(1);

    let listing = state.tracker.topic_posts(board_id, topic_id, page).await?;
    let topic = state
        .tracker
        .record_view(&session.id, board_id, topic_id)
        .await?;

    let body = TopicPostsResponse {
        topic: topic_response(&topic, listing.total_posts.saturating_sub(1)),
        posts: Paginated {
            items: listing.posts.iter().map(post_response).collect(),
            page: listing.page,
            total_pages: listing.total_pages,
        },
    };

    let mut builder = HttpResponse::Ok();
    if session.is_new {
        let cookie = Cookie::build(SESSION_COOKIE, session.id.clone())
            .path("/")
            .http_only(true)
            .max_age(CookieDuration::seconds(SESSION_TTL.as_secs() as i64))
            .finish();
        builder.cookie(cookie);
    }

    Ok(builder.json(ApiResponse::ok(body)))
}
