// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service discovery and liveness probes. Nothing here touches task data
// beyond a store ping.
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service description and endpoint map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "status": true,
        "msg": "Task manager API",
        "data": {
            "name": env!("CARGO_PKG_NAME"),
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "tasks": "/api/tasks[/:task_id] (protected)",
                "filtered": "/api/tasks/filtered?startTime&endTime&location&category (protected)",
            }
        }
    }))
}

/// GET /health - 200 when the task store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let now = chrono::Utc::now();

    if let Err(e) = state.tasks.health_check().await {
        tracing::warn!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable("Task store unavailable"));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": true,
            "msg": "ok",
            "data": {
                "timestamp": now,
                "store": "ok"
            }
        })),
    ))
}
