//! Authentication Handlers
//!
//! Registration, login, current-user lookup and logout.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo, UserRole};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - create an account
///
/// Every registration gets the `user` role; there is no self-promotion.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;
    let user = user_repo::create(
        state.pool(),
        &req.email,
        &req.display_name,
        UserRole::User,
        &password_hash,
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    issue_session(&state, user.info())
}

/// POST /api/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = user_repo::find_by_email(state.pool(), &req.email).await?;

    // Fixed delay before inspecting the result, to keep response timing
    // uniform across "no such user" and "wrong password"
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => {
            if !verify_password(&req.password, &u.password_hash)? {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            u
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    tracing::info!(user_id = user.id, "Login successful");

    issue_session(&state, user.info())
}

/// GET /api/auth/me - the authenticated user
pub async fn me(Extension(current_user): Extension<CurrentUser>) -> Json<UserInfo> {
    Json(current_user.info())
}

/// POST /api/auth/logout - clear the session
///
/// Tokens stay valid until expiry (stateless JWT); this only resets the
/// observable session state.
pub async fn logout(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Json<bool> {
    state.session.sign_out();
    tracing::info!(user_id = current_user.id, "User signed out");
    Json(true)
}

fn issue_session(state: &ServerState, user: UserInfo) -> AppResult<Json<LoginResponse>> {
    let token = state
        .jwt
        .generate_token(&user)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;
    let expires_in = state.jwt.config.expiration_minutes * 60;

    state.session.sign_in(user.clone());

    Ok(Json(LoginResponse {
        token,
        expires_in,
        user,
    }))
}
