//! Authentication and account handlers.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quorum_core::domain::User;
use quorum_core::ports::{PasswordService, TokenService};
use quorum_shared::ApiResponse;
use quorum_shared::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, PasswordResetConfirmRequest,
    PasswordResetRequest, RegisterRequest, UpdateAccountRequest,
};

use crate::handlers::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// How long a password-reset token stays valid.
const RESET_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

fn reset_token_key(token: &str) -> String {
    format!("pwreset:{token}")
}

fn check_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> AppResult<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.username.trim().is_empty() || req.username.len() > 150 {
        return Err(AppError::BadRequest("Invalid username".to_string()));
    }
    check_email(&req.email)?;
    check_password(&req.password)?;

    // Check if user already exists
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    // Hash password
    let password_hash = password_service.hash(&req.password)?;

    // Create user
    let user = User::new(req.username, req.email, password_hash);
    let saved_user = state.users.save(user).await?;

    // The original flow logs a fresh signup straight in, so issue a token
    let token = token_service.generate_token(saved_user.id, &saved_user.username)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by email
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service.generate_token(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(&user))))
}

/// PUT /api/auth/me - Update the caller's account details
pub async fn update_account(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateAccountRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    if let Some(email) = req.email {
        check_email(&email)?;
        user.email = email;
    }
    if let Some(first_name) = req.first_name {
        user.first_name = Some(first_name);
    }
    if let Some(last_name) = req.last_name {
        user.last_name = Some(last_name);
    }
    user.updated_at = chrono::Utc::now();

    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(&saved))))
}

/// PUT /api/auth/password - Change the caller's password
pub async fn change_password(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    let valid = password_service.verify(&req.current_password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    check_password(&req.new_password)?;
    user.password_hash = password_service.hash(&req.new_password)?;
    user.updated_at = chrono::Utc::now();

    state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Password changed")))
}

/// POST /api/auth/password-reset
///
/// Always answers 202 so the endpoint cannot be used to probe for
/// registered addresses. Token delivery happens out of band.
pub async fn request_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if let Some(user) = state.users.find_by_email(&req.email).await? {
        let token = Uuid::new_v4().to_string();
        state
            .sessions
            .set(
                &reset_token_key(&token),
                &user.id.to_string(),
                Some(RESET_TOKEN_TTL),
            )
            .await?;

        tracing::debug!(user_id = %user.id, reset_token = %token, "Password reset token issued");
    }

    Ok(HttpResponse::Accepted().json(ApiResponse::ok_with_message(
        (),
        "If the address is registered, a reset token has been issued",
    )))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<PasswordResetConfirmRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let key = reset_token_key(&req.token);

    let user_id = state
        .sessions
        .get(&key)
        .await
        .and_then(|raw| Uuid::parse_str(&raw).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

    let mut user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

    check_password(&req.new_password)?;
    user.password_hash = password_service.hash(&req.new_password)?;
    user.updated_at = chrono::Utc::now();

    state.users.save(user).await?;
    state.sessions.delete(&key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Password reset")))
}
