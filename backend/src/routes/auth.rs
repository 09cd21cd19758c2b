//! Authentication routes
//!
//! Provides endpoints for user registration, login, and the current user.
//! Body extraction failures are turned into 400 responses with the
//! standard error body instead of axum's default plain-text rejections.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use auth_service_shared::{LoginRequest, PublicUser, RegisterRequest, TokenResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /register
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<PublicUser>> {
    let Json(req) = body?;
    let user = AuthService::register(state.users(), req).await?;
    Ok(Json(user))
}

/// Login with username or email and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = body?;
    let token = AuthService::login(state.users(), state.jwt(), req).await?;
    Ok(Json(TokenResponse { token }))
}

/// Get the user the bearer token was issued to
///
/// GET /me
async fn me(State(state): State<AppState>, auth_user: AuthUser) -> ApiResult<Json<PublicUser>> {
    let user = AuthService::current_user(state.users(), auth_user.user_id).await?;
    Ok(Json(user))
}
