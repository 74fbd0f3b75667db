use axum::{extract::State, Json};
use serde_json::json;

use crate::state::AppState;

/// GET /api/health
/// Reports whether upstream credentials are configured (presence flags
/// only) and which upstream host is in use.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let info = &state.health;
    Json(json!({
        "ok": true,
        "credentials": {
            "clientId": info.client_id_configured,
            "clientSecret": info.client_secret_configured,
        },
        "upstreamHost": info.upstream_host,
        "now": chrono::Utc::now().to_rfc3339(),
    }))
}
