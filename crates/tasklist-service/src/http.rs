use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tasklist_core::task::{CreateTask, Task};
use tracing::debug;

use crate::{ServiceError, TaskService};

/// Outcome of probing the API with a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    /// The server answered with a non-success status.
    ApiError(u16),
    /// The request never got a response.
    Failed(String),
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("Connected"),
            ConnectionStatus::ApiError(status) => write!(f, "API error ({status})"),
            ConnectionStatus::Failed(_) => f.write_str("Connection failed"),
        }
    }
}

/// Async HTTP client implementation of TaskService.
///
/// `api_base_url` includes the `/api` prefix, e.g. `http://127.0.0.1:5050/api`.
#[derive(Clone)]
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(api_base_url: &str) -> Self {
        let base_url = api_base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the API by listing tasks. Never fails; the outcome is the status.
    pub async fn connection_status(&self) -> ConnectionStatus {
        match self
            .client
            .get(self.url("/todos"))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => ConnectionStatus::Connected,
            Ok(resp) => ConnectionStatus::ApiError(resp.status().as_u16()),
            Err(e) => ConnectionStatus::Failed(e.to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .send(self.client.get(self.url(path)))
            .await?;
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    }

    /// POST a JSON body; an empty success body yields `None`.
    async fn post_json_opt<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ServiceError> {
        let resp = self
            .send(
                self.client
                    .post(self.url(path))
                    .json(body),
            )
            .await?;
        let text = resp
            .text()
            .await
            .map_err(|e| ServiceError::Transport(format!("read body: {e}")))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    }

    async fn put_req(&self, path: &str) -> Result<(), ServiceError> {
        self.send(self.client.put(self.url(path)))
            .await
            .map(|_| ())
    }

    async fn delete_req(&self, path: &str) -> Result<(), ServiceError> {
        self.send(self.client.delete(self.url(path)))
            .await
            .map(|_| ())
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body);
    debug!("request failed with {status}: {msg}");

    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(msg),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ServiceError::InvalidInput(msg)
        }
        _ if msg.is_empty() => ServiceError::Internal(format!("HTTP {}", status.as_u16())),
        _ => ServiceError::Internal(format!("HTTP {}: {msg}", status.as_u16())),
    }
}

#[async_trait]
impl TaskService for HttpService {
    async fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.get_json("/todos").await
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Option<Task>, ServiceError> {
        self.post_json_opt("/todos", input).await
    }

    async fn toggle_task(&self, id: i64) -> Result<(), ServiceError> {
        self.put_req(&format!("/todos/{id}/toggle")).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        self.delete_req(&format!("/todos/{id}")).await
    }
}
