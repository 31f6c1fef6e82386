use async_trait::async_trait;
use tasklist_core::task::{CreateTask, Task};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// The todo API as seen by a client.
///
/// `HttpService` talks to a running tasklist-server.
/// `LocalService` wraps a `Database` in-process.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// The full collection in server order.
    async fn list_tasks(&self) -> Result<Vec<Task>, ServiceError>;

    /// Returns the created task when the server echoes it back.
    async fn create_task(&self, input: &CreateTask) -> Result<Option<Task>, ServiceError>;

    async fn toggle_task(&self, id: i64) -> Result<(), ServiceError>;

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError>;
}
