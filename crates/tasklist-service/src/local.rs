use std::sync::Arc;

use async_trait::async_trait;
use tasklist_core::task::{CreateTask, Task};
use tasklist_db::{Database, DbError};

use crate::{ServiceError, TaskService};

/// In-process implementation backed by a `Database`.
#[derive(Clone)]
pub struct LocalService {
    db: Arc<dyn Database>,
}

impl LocalService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl TaskService for LocalService {
    async fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        Ok(self.db.list_tasks().await?)
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Option<Task>, ServiceError> {
        let title = input
            .validated_title()
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        Ok(Some(self.db.create_task(&CreateTask { title }).await?))
    }

    async fn toggle_task(&self, id: i64) -> Result<(), ServiceError> {
        self.db.toggle_task(id).await?;
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.db.delete_task(id).await?)
    }
}
