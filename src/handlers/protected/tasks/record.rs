use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{Task, TaskFields};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::{MSG_DELETED, MSG_FOUND, MSG_UPDATED};

/// GET /api/tasks/:task_id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Task> {
    let Path(task_id) = path?;
    let task = state.tasks.get(user.id, &task_id).await?;
    Ok(ApiResponse::task(task, MSG_FOUND))
}

/// PUT /api/tasks/:task_id - full replace of the content fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<TaskFields>, JsonRejection>,
) -> ApiResult<Task> {
    let Json(fields) = payload?;
    // An undecodable id goes through as empty so the field check still runs first
    let task_id = path.map(|Path(id)| id).unwrap_or_default();
    let task = state.tasks.update(user.id, &task_id, fields).await?;
    Ok(ApiResponse::task(task, MSG_UPDATED))
}

/// DELETE /api/tasks/:task_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<()> {
    let Path(task_id) = path?;
    state.tasks.delete(user.id, &task_id).await?;
    Ok(ApiResponse::message(MSG_DELETED))
}
