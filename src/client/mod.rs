//! Typed HTTP client for the task API, plus the form and list models that
//! front-ends drive through it.
//!
//! Every call takes explicit [`Credentials`]; the client keeps no session.

pub mod form;
pub mod list;

use std::collections::HashMap;

use reqwest::{header::AUTHORIZATION, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::database::models::{Task, TaskFields, TaskFilterParams};

pub use form::{FormError, FormMode, TaskForm};
pub use list::TaskList;

/// Bearer token obtained from the identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API URL cannot be used as a base: {0}")]
    InvalidBase(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a `{status: false, msg}` envelope
    #[error("{msg} (HTTP {status})")]
    Api {
        status: StatusCode,
        msg: String,
        errors: HashMap<String, String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: bool,
    #[serde(default)]
    msg: String,
    task: Option<Task>,
    tasks: Option<Vec<Task>>,
    #[serde(default)]
    errors: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct TaskClient {
    base: Url,
    http: reqwest::Client,
}

impl TaskClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBase(base_url.to_string()));
        }
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn list(&self, creds: &Credentials) -> Result<Vec<Task>, ClientError> {
        let envelope = self.send(self.request(Method::GET, &[], creds)).await?;
        take_tasks(envelope)
    }

    pub async fn get(&self, creds: &Credentials, task_id: &str) -> Result<Task, ClientError> {
        let envelope = self.send(self.request(Method::GET, &[task_id], creds)).await?;
        take_task(envelope)
    }

    pub async fn create(&self, creds: &Credentials, fields: &TaskFields) -> Result<Task, ClientError> {
        let request = self.request(Method::POST, &[], creds).json(fields);
        take_task(self.send(request).await?)
    }

    pub async fn update(
        &self,
        creds: &Credentials,
        task_id: &str,
        fields: &TaskFields,
    ) -> Result<Task, ClientError> {
        let request = self.request(Method::PUT, &[task_id], creds).json(fields);
        take_task(self.send(request).await?)
    }

    /// Returns the server's confirmation message
    pub async fn delete(&self, creds: &Credentials, task_id: &str) -> Result<String, ClientError> {
        let envelope = self.send(self.request(Method::DELETE, &[task_id], creds)).await?;
        Ok(envelope.msg)
    }

    pub async fn filtered(
        &self,
        creds: &Credentials,
        params: &TaskFilterParams,
    ) -> Result<Vec<Task>, ClientError> {
        let request = self.request(Method::GET, &["filtered"], creds).query(params);
        take_tasks(self.send(request).await?)
    }

    fn request(&self, method: Method, segments: &[&str], creds: &Credentials) -> RequestBuilder {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "tasks"]).extend(segments);
        }
        self.http
            .request(method, url)
            .header(AUTHORIZATION, creds.bearer())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Envelope, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::MalformedResponse(e.to_string()));
            }
            // Non-JSON error bodies (proxies, axum's own rejections)
            Err(_) => {
                return Err(ClientError::Api {
                    status,
                    msg: body.trim().to_string(),
                    errors: HashMap::new(),
                })
            }
        };

        if !status.is_success() || !envelope.status {
            tracing::debug!("Task API answered {}: {}", status, envelope.msg);
            return Err(ClientError::Api {
                status,
                msg: envelope.msg,
                errors: envelope.errors,
            });
        }
        Ok(envelope)
    }
}

fn take_task(envelope: Envelope) -> Result<Task, ClientError> {
    envelope
        .task
        .ok_or_else(|| ClientError::MalformedResponse("missing task".to_string()))
}

fn take_tasks(envelope: Envelope) -> Result<Vec<Task>, ClientError> {
    envelope
        .tasks
        .ok_or_else(|| ClientError::MalformedResponse("missing tasks".to_string()))
}
