#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use task_manager_api::auth::JwtKeys;
use task_manager_api::client::{Credentials, TaskClient};
use task_manager_api::config::{AppConfig, StoreBackend};
use task_manager_api::database::MemoryTaskStore;
use task_manager_api::{app, AppState};

/// An API server on an ephemeral port, backed by its own in-memory store
pub struct TestServer {
    pub base_url: String,
    pub keys: JwtKeys,
    pub http: reqwest::Client,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.store.backend = StoreBackend::Memory;
    config.api.enable_request_logging = false;
    config
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_with(test_config()).await
}

pub async fn spawn_with(config: AppConfig) -> Result<TestServer> {
    let keys = JwtKeys::from_config(&config.security)?;
    let state = AppState::new(config, Arc::new(MemoryTaskStore::new()))?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        keys,
        http: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token_for(&self, user: Uuid) -> String {
        self.keys.issue(user).expect("token")
    }

    pub fn credentials_for(&self, user: Uuid) -> Credentials {
        Credentials::new(self.token_for(user))
    }

    pub fn client(&self) -> TaskClient {
        TaskClient::new(&self.base_url).expect("client")
    }

    /// Send `method path` as `user`, returning status and JSON body
    pub async fn call(
        &self,
        method: reqwest::Method,
        path: &str,
        user: Uuid,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(self.token_for(user));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        Ok((status, body))
    }

    /// Create a task as `user` and return its id
    pub async fn create(&self, user: Uuid, body: Value) -> Result<String> {
        let (status, body) = self.call(reqwest::Method::POST, "/api/tasks", user, Some(body)).await?;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["task"]["_id"]
            .as_str()
            .map(str::to_string)
            .context("created task has no _id")
    }
}

pub fn meetup() -> Value {
    json!({
        "eventName": "Meetup",
        "startTime": "2024-01-01T10:00",
        "endTime": "2024-01-01T12:00",
        "location": "Hall A",
        "description": "desc",
        "category": "Social event"
    })
}

pub fn event(name: &str, start: &str, end: &str, location: &str, category: &str) -> Value {
    json!({
        "eventName": name,
        "startTime": start,
        "endTime": end,
        "location": location,
        "description": format!("{} details", name),
        "category": category
    })
}
