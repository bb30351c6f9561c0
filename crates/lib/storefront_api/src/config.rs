//! API server configuration.

use storefront_core::auth::jwt::TokenSecrets;
use thiserror::Error;

/// Error raised when required configuration is missing at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Signing secrets for access and refresh tokens.
    pub token_secrets: TokenSecrets,
    /// Whether auth cookies are marked `Secure` (true in production).
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable               | Meaning                                     |
    /// |------------------------|---------------------------------------------|
    /// | `ACCESS_TOKEN_SECRET`  | HS256 secret for access tokens (required)   |
    /// | `REFRESH_TOKEN_SECRET` | HS256 secret for refresh tokens (required)  |
    /// | `APP_ENV`              | `production` enables Secure cookies         |
    ///
    /// A missing secret is a fatal startup error, not a per-request one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token_secrets: TokenSecrets {
                access: require_var("ACCESS_TOKEN_SECRET")?,
                refresh: require_var("REFRESH_TOKEN_SECRET")?,
            },
            secure_cookies: std::env::var("APP_ENV").is_ok_and(|v| v == "production"),
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
