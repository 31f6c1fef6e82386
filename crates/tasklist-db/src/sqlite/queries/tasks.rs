use rusqlite::{params, OptionalExtension, Row};
use tasklist_core::task::{CreateTask, Task};

use super::super::{SqliteDatabase, SqliteResultExt};
use crate::DbError;

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        completed: row.get("completed")?,
    })
}

impl SqliteDatabase {
    pub fn list_tasks_sync(&self) -> Result<Vec<Task>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, title, completed FROM todos ORDER BY id ASC")
                .to_db()?;
            let rows = stmt.query_map([], row_to_task).to_db()?;
            rows.collect::<rusqlite::Result<Vec<_>>>().to_db()
        })
    }

    pub fn get_task_sync(&self, id: i64) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, title, completed FROM todos WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()
            .to_db()?
            .ok_or_else(|| DbError::NotFound(format!("task {id}")))
        })
    }

    pub fn create_task_sync(&self, input: &CreateTask) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            let next_id: i64 = conn
                .query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM todos", [], |row| {
                    row.get(0)
                })
                .to_db()?;
            conn.execute(
                "INSERT INTO todos (id, title, completed) VALUES (?1, ?2, 0)",
                params![next_id, input.title],
            )
            .to_db()?;
            Ok(Task {
                id: next_id,
                title: input.title.clone(),
                completed: false,
            })
        })
    }

    pub fn toggle_task_sync(&self, id: i64) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE todos SET completed = NOT completed WHERE id = ?1",
                    params![id],
                )
                .to_db()?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("task {id}")));
            }
            conn.query_row(
                "SELECT id, title, completed FROM todos WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .to_db()
        })
    }

    pub fn delete_task_sync(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let changed = conn
                .execute("DELETE FROM todos WHERE id = ?1", params![id])
                .to_db()?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("task {id}")));
            }
            Ok(())
        })
    }
}
