//! Authentication and session logic.
//!
//! Provides password hashing, JWT management, the session registry, and
//! the user queries shared across `storefront_api` and the server binary.

pub mod jwt;
pub mod password;
pub mod queries;
pub mod sessions;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
