//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;

/// `GET /api/health` — liveness plus database connectivity.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    // Check PostgreSQL connectivity.
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Ok(Json(serde_json::json!({
        "status": "ok",
        "version": storefront_core::version(),
        "dbConnected": db_connected,
    })))
}
