//! Authentication middleware
//!
//! Axum middleware for JWT authentication and role checks.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Paths reachable without a token
fn is_public_api_route(path: &str) -> bool {
    matches!(
        path,
        "/api/auth/login" | "/api/auth/register" | "/api/health"
    )
}

/// Authentication middleware - requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// injects [`CurrentUser`] into the request extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight skips authentication
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own handling (404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Admin middleware - requires `role == admin`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = user.id,
            email = %user.email,
            "Admin action attempted by non-admin"
        );
        return Err(AppError::Forbidden("Administrator role required".into()));
    }

    Ok(next.run(req).await)
}
