//! Authentication request handlers.
//!
//! Tokens travel in httpOnly cookies, never in response bodies.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use storefront_core::models::auth::PublicUser;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::services::{auth, cookies};

/// Request body for `POST /api/auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signup` — create an account and open a session.
pub async fn signup_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<PublicUser>)> {
    let (user, pair) = auth::signup(
        &state.pool,
        state.sessions.as_ref(),
        &state.config.token_secrets,
        &body.name,
        &body.email,
        &body.password,
    )
    .await?;

    let jar = jar
        .add(cookies::access_cookie(
            &pair.access_token,
            state.config.secure_cookies,
        ))
        .add(cookies::refresh_cookie(
            &pair.refresh_token,
            state.config.secure_cookies,
        ));

    Ok((StatusCode::CREATED, jar, Json(user)))
}

/// `POST /api/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<PublicUser>)> {
    let (user, pair) = auth::login(
        &state.pool,
        state.sessions.as_ref(),
        &state.config.token_secrets,
        &body.email,
        &body.password,
    )
    .await?;

    let jar = jar
        .add(cookies::access_cookie(
            &pair.access_token,
            state.config.secure_cookies,
        ))
        .add(cookies::refresh_cookie(
            &pair.refresh_token,
            state.config.secure_cookies,
        ));

    Ok((jar, Json(user)))
}

/// `POST /api/auth/logout` — close the session and clear both cookies.
///
/// Succeeds with or without a valid refresh cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    let presented = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string());

    auth::logout(
        state.sessions.as_ref(),
        &state.config.token_secrets,
        presented.as_deref(),
    )
    .await?;

    let jar = jar
        .add(cookies::clear_access_cookie(state.config.secure_cookies))
        .add(cookies::clear_refresh_cookie(state.config.secure_cookies));

    Ok((
        jar,
        Json(serde_json::json!({"message": "Logged out successfully"})),
    ))
}

/// `POST /api/auth/refresh-token` — mint a new access cookie.
///
/// The refresh cookie is left as is; only the access token is reissued.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    let presented = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".into()))?;

    let access_token = auth::refresh(
        state.sessions.as_ref(),
        &state.config.token_secrets,
        &presented,
    )
    .await?;

    let jar = jar.add(cookies::access_cookie(
        &access_token,
        state.config.secure_cookies,
    ));

    Ok((
        jar,
        Json(serde_json::json!({"message": "Token refreshed successfully"})),
    ))
}

/// `GET /api/auth/profile` — the authenticated user's projection.
pub async fn profile_handler(
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> AppResult<Json<PublicUser>> {
    Ok(Json(user.0))
}
