use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{Task, TaskFields, TaskFilterParams};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::{MSG_CREATED, MSG_FILTERED, MSG_LISTED};

/// GET /api/tasks - every task owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Task>> {
    let tasks = state.tasks.list(user.id).await?;
    Ok(ApiResponse::tasks(tasks, MSG_LISTED))
}

/// POST /api/tasks - create a task owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<TaskFields>, JsonRejection>,
) -> ApiResult<Task> {
    let Json(fields) = payload?;
    let task = state.tasks.create(user.id, fields).await?;
    Ok(ApiResponse::task(task, MSG_CREATED))
}

/// GET /api/tasks/filtered - tasks of any owner matching the query criteria
pub async fn filtered(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    query: Result<Query<TaskFilterParams>, QueryRejection>,
) -> ApiResult<Vec<Task>> {
    let Query(params) = query?;
    let tasks = state.tasks.filtered(&params).await?;
    Ok(ApiResponse::tasks(tasks, MSG_FILTERED))
}
