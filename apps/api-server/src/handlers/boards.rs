//! Board handlers.

use actix_web::{HttpResponse, web};

use quorum_core::domain::Board;
use quorum_shared::ApiResponse;
use quorum_shared::dto::NewBoardRequest;

use crate::handlers::board_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/boards - the board index
pub async fn list_boards(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let boards = state.boards.list_all().await?;
    let body: Vec<_> = boards.iter().map(board_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/boards - create a board
pub async fn create_board(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<NewBoardRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.trim().is_empty() || req.name.len() > 30 {
        return Err(AppError::BadRequest(
            "Board name must be 1-30 characters".to_string(),
        ));
    }
    if req.description.len() > 100 {
        return Err(AppError::BadRequest(
            "Board description must not exceed 100 characters".to_string(),
        ));
    }

    tracing::info!(user = %identity.username, board = %req.name, "Creating board");

    let board = state
        .boards
        .save(Board::new(req.name, req.description))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(board_response(&board))))
}
