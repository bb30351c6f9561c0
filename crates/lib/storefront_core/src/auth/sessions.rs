//! Server-side session registry.
//!
//! Maps a user ID to the single refresh token currently honored for that
//! user. Entries carry a TTL equal to the refresh token lifetime, so the
//! registry entry and the token itself invalidate together.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AuthError;
use super::jwt::REFRESH_TOKEN_EXPIRY_SECS;

/// Registry of the active refresh token per user.
///
/// `store` overwrites any previous entry for the user, so at most one
/// refresh token per user verifies at any time. A failed write must
/// surface as an error, never be swallowed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert the entry for `user_id` with TTL equal to the refresh
    /// token lifetime.
    async fn store(&self, user_id: &Uuid, refresh_token: &str) -> Result<(), AuthError>;

    /// Fetch the current refresh token for `user_id`, absent if expired
    /// or never stored.
    async fn get(&self, user_id: &Uuid) -> Result<Option<String>, AuthError>;

    /// Remove the entry for `user_id`. Deleting an absent entry is not
    /// an error.
    async fn delete(&self, user_id: &Uuid) -> Result<(), AuthError>;
}

/// `SessionStore` backed by the `sessions` table.
///
/// One row per user; the upsert keeps per-user operations atomic at the
/// database so no in-process locking is needed.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn store(&self, user_id: &Uuid, refresh_token: &str) -> Result<(), AuthError> {
        let expires_at = Utc::now() + Duration::seconds(REFRESH_TOKEN_EXPIRY_SECS);
        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, refresh_token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET refresh_token = EXCLUDED.refresh_token,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(user_id)
        .bind(refresh_token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, user_id: &Uuid) -> Result<Option<String>, AuthError> {
        let token = sqlx::query_scalar::<_, String>(
            "SELECT refresh_token FROM sessions WHERE user_id = $1 AND expires_at > now()",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    async fn delete(&self, user_id: &Uuid) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// A stored entry with expiry.
#[derive(Debug, Clone)]
struct SessionEntry {
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

/// In-memory `SessionStore` used by tests.
#[derive(Debug)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<Uuid, SessionEntry>>,
    /// Entry TTL in seconds. Defaults to the refresh token lifetime.
    pub ttl_secs: i64,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_secs: REFRESH_TOKEN_EXPIRY_SECS,
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn store(&self, user_id: &Uuid, refresh_token: &str) -> Result<(), AuthError> {
        let entry = SessionEntry {
            refresh_token: refresh_token.to_string(),
            expires_at: Utc::now() + Duration::seconds(self.ttl_secs),
        };
        self.entries.write().await.insert(*user_id, entry);
        Ok(())
    }

    async fn get(&self, user_id: &Uuid) -> Result<Option<String>, AuthError> {
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).and_then(|entry| {
            if Utc::now() < entry.expires_at {
                Some(entry.refresh_token.clone())
            } else {
                None
            }
        }))
    }

    async fn delete(&self, user_id: &Uuid) -> Result<(), AuthError> {
        self.entries.write().await.remove(user_id);
        Ok(())
    }
}
