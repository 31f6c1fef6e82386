mod sqlite;

use std::path::PathBuf;

use async_trait::async_trait;
use tasklist_core::task::{CreateTask, Task};
use thiserror::Error;

pub use sqlite::SqliteDatabase;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Where the server keeps its task table.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// Explicit SQLite file. Falls back to `data_dir()/tasklist.db`.
    pub sqlite_path: Option<PathBuf>,
}

/// Storage for the task collection.
///
/// The server is the only writer; ids are assigned here and never reused
/// while a higher id exists.
#[async_trait]
pub trait Database: Send + Sync {
    /// All tasks in ascending id order.
    async fn list_tasks(&self) -> Result<Vec<Task>, DbError>;
    async fn get_task(&self, id: i64) -> Result<Task, DbError>;
    /// Inserts a task with `completed = false`. The caller validates the title.
    async fn create_task(&self, input: &CreateTask) -> Result<Task, DbError>;
    /// Flips `completed` and returns the updated row.
    async fn toggle_task(&self, id: i64) -> Result<Task, DbError>;
    async fn delete_task(&self, id: i64) -> Result<(), DbError>;
}

/// `$XDG_DATA_HOME/tasklist`, or `~/.local/share/tasklist`.
pub fn data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("tasklist")
}
