use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::database::models::Task;
use crate::error::MSG_INTERNAL;

/// Success envelope: `{<field>: data, status: true, msg}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    /// Envelope key for the payload; `None` sends only status and msg
    pub field: Option<&'static str>,
    pub data: T,
    pub msg: String,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_field(field: &'static str, data: T, msg: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            data,
            msg: msg.into(),
            status_code: None, // Default to 200 OK
        }
    }

    /// Override the status code
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl ApiResponse<Task> {
    pub fn task(task: Task, msg: impl Into<String>) -> Self {
        Self::with_field("task", task, msg)
    }
}

impl ApiResponse<Vec<Task>> {
    pub fn tasks(tasks: Vec<Task>, msg: impl Into<String>) -> Self {
        Self::with_field("tasks", tasks, msg)
    }
}

impl ApiResponse<()> {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            field: None,
            data: (),
            msg: msg.into(),
            status_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let mut envelope = json!({
            "status": true,
            "msg": self.msg
        });

        if let Some(field) = self.field {
            match serde_json::to_value(&self.data) {
                Ok(value) => envelope[field] = value,
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "status": false, "msg": MSG_INTERNAL })),
                    )
                        .into_response();
                }
            }
        }

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
