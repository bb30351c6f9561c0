//! Authentication middleware. Access-cookie extraction, JWT verification,
//! and the admin gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use storefront_core::auth::{jwt, queries};
use storefront_core::models::auth::{PublicUser, UserRole};

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::ACCESS_COOKIE;

/// Authenticated user stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

/// Axum middleware: reads the access cookie, verifies the JWT, loads the
/// user, and injects `CurrentUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing access token".into()))?;

    let claims = jwt::verify_token(&token, state.config.token_secrets.access.as_bytes())
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    // The account may have been deleted since the token was issued.
    let user = queries::find_user_by_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    request.extensions_mut().insert(CurrentUser(user.into()));

    Ok(next.run(request).await)
}

/// Axum middleware: requires the authenticated user to be an admin.
/// Layered after `require_auth`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::Unauthorized("Missing access token".into()))?;

    if user.0.role != UserRole::Admin {
        return Err(AppError::Forbidden("Admin access required".into()));
    }

    Ok(next.run(request).await)
}
