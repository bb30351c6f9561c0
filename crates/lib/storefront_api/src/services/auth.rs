//! Authentication service. Orchestrates the signup/login/logout/refresh
//! flows over the credential store, token issuer, and session registry.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use storefront_core::auth::jwt::{self, TokenSecrets};
use storefront_core::auth::sessions::SessionStore;
use storefront_core::auth::{password, queries};
use storefront_core::models::auth::{PublicUser, TokenPair};

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Signup / login
// ---------------------------------------------------------------------------

/// Register a new user account and open a session for it.
pub async fn signup(
    pool: &PgPool,
    sessions: &dyn SessionStore,
    secrets: &TokenSecrets,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<(PublicUser, TokenPair)> {
    if queries::email_exists(pool, email).await? {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = password::hash_password(password)?;
    let user = queries::create_user(pool, name, email, &password_hash).await?;

    let pair = jwt::issue_token_pair(&user.id.to_string(), secrets)?;
    sessions.store(&user.id, &pair.refresh_token).await?;

    info!(email, "new user registered");
    Ok((user.into(), pair))
}

/// Authenticate with email + password, replacing any prior session.
pub async fn login(
    pool: &PgPool,
    sessions: &dyn SessionStore,
    secrets: &TokenSecrets,
    email: &str,
    password: &str,
) -> AppResult<(PublicUser, TokenPair)> {
    let user = match queries::find_user_by_email(pool, email).await? {
        // Same error for wrong email and wrong password
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
        Some(row) => row,
    };

    if !password::verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let pair = jwt::issue_token_pair(&user.id.to_string(), secrets)?;
    sessions.store(&user.id, &pair.refresh_token).await?;

    Ok((user.into(), pair))
}

// ---------------------------------------------------------------------------
// Refresh / logout
// ---------------------------------------------------------------------------

/// Exchange a refresh token for a new access token.
///
/// The presented token must verify cryptographically and exactly match
/// the registry entry for its user; anything displaced by a later login
/// or removed by logout fails here. The refresh token itself is not
/// rotated.
pub async fn refresh(
    sessions: &dyn SessionStore,
    secrets: &TokenSecrets,
    presented: &str,
) -> AppResult<String> {
    let claims = jwt::verify_token(presented, secrets.refresh.as_bytes())
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".into()))?;

    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".into()))?;

    let stored = sessions
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".into()))?;

    if stored != presented {
        return Err(AppError::Unauthorized("Invalid refresh token".into()));
    }

    let access_token = jwt::generate_access_token(&claims.sub, secrets.access.as_bytes())?;
    Ok(access_token)
}

/// Close the session named by a refresh token, if one was presented.
///
/// A missing or unverifiable token is not an error; logout still
/// succeeds and the transport clears its cookies either way.
pub async fn logout(
    sessions: &dyn SessionStore,
    secrets: &TokenSecrets,
    presented: Option<&str>,
) -> AppResult<()> {
    if let Some(token) = presented
        && let Some(claims) = jwt::verify_token(token, secrets.refresh.as_bytes())
        && let Ok(user_id) = claims.sub.parse::<Uuid>()
    {
        sessions.delete(&user_id).await?;
    }
    Ok(())
}
