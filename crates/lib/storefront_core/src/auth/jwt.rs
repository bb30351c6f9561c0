//! JWT token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenPair};

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Signing secrets for the two token kinds.
///
/// Access and refresh tokens are signed with distinct secrets, so a token
/// of one kind never verifies as the other.
#[derive(Debug, Clone)]
pub struct TokenSecrets {
    pub access: String,
    pub refresh: String,
}

/// Generate a signed JWT access token (HS256, 15 min expiry).
pub fn generate_access_token(user_id: &str, secret: &[u8]) -> Result<String, AuthError> {
    sign(user_id, ACCESS_TOKEN_EXPIRY_SECS, secret)
}

/// Generate a signed JWT refresh token (HS256, 7 day expiry).
pub fn generate_refresh_token(user_id: &str, secret: &[u8]) -> Result<String, AuthError> {
    sign(user_id, REFRESH_TOKEN_EXPIRY_SECS, secret)
}

/// Mint an access + refresh token pair for a user.
pub fn issue_token_pair(user_id: &str, secrets: &TokenSecrets) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: generate_access_token(user_id, secrets.access.as_bytes())?,
        refresh_token: generate_refresh_token(user_id, secrets.refresh.as_bytes())?,
    })
}

/// Verify a JWT against the given secret, returning the claims on success.
pub fn verify_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

fn sign(user_id: &str, expiry_secs: i64, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}
