use std::sync::{Mutex, MutexGuard, PoisonError};

use tasklist_core::task::{validate_title, CreateTask};
use tasklist_service::TaskService;
use tracing::{debug, warn};

use crate::render::{self, PageView};
use crate::state::{ClientState, NoticeKind};

/// Result of a user-initiated mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the change and the list was re-fetched.
    Done,
    /// Rejected locally; no request was sent.
    Rejected,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The request failed; an error notice is showing.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch finished first; this response was dropped.
    Stale,
}

/// Mirrors the server's task collection and mediates every read and write.
///
/// Methods take `&self` so a second action can start while the first is
/// still waiting on the network. The state lock is never held across an
/// await.
pub struct TaskStore<S> {
    service: S,
    api_url: String,
    state: Mutex<ClientState>,
}

impl<S: TaskService> TaskStore<S> {
    /// `api_url` is only used for display in the load-error state.
    pub fn new(service: S, api_url: impl Into<String>) -> Self {
        Self {
            service,
            api_url: api_url.into(),
            state: Mutex::new(ClientState::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    pub fn state(&self) -> ClientState {
        self.lock().clone()
    }

    /// Run `f` against the state under the lock.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut ClientState) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn set_input(&self, value: impl Into<String>) {
        self.lock().set_input(value);
    }

    /// Render the current state.
    pub fn page(&self) -> PageView {
        render::render(&self.lock(), &self.api_url)
    }

    /// Reload the whole collection from the server.
    pub async fn fetch_all(&self) -> FetchOutcome {
        let ticket = self.lock().begin_fetch();
        let result = self.service.list_tasks().await;
        if let Err(ref e) = result {
            warn!("error loading tasks from {}: {e}", self.api_url);
        }
        let mut state = self.lock();
        let failed = result.is_err();
        let applied = state.apply_fetch(ticket, result.map_err(|e| e.to_string()));
        match (applied, failed) {
            (false, _) => {
                debug!("discarding stale fetch {ticket:?}");
                FetchOutcome::Stale
            }
            (true, true) => FetchOutcome::Failed,
            (true, false) => {
                debug!("loaded {} tasks", state.total());
                FetchOutcome::Applied
            }
        }
    }

    /// Submit whatever is in the input field.
    pub async fn submit(&self) -> Outcome {
        let input = self.lock().input().to_string();
        self.create(&input).await
    }

    /// Create a task. Blank titles are rejected without a request.
    pub async fn create(&self, title: &str) -> Outcome {
        let Ok(title) = validate_title(title) else {
            self.lock()
                .notify(NoticeKind::Warning, "Please enter a task");
            return Outcome::Rejected;
        };

        debug!("adding task: {title}");
        match self.service.create_task(&CreateTask { title }).await {
            Ok(created) => {
                if let Some(task) = created {
                    debug!("task added: {}", task.id);
                }
                {
                    let mut state = self.lock();
                    state.clear_input();
                    state.notify(NoticeKind::Success, "Task added successfully!");
                }
                self.fetch_all().await;
                Outcome::Done
            }
            Err(e) => {
                warn!("error adding task: {e}");
                self.lock()
                    .notify(NoticeKind::Error, format!("Failed to add task: {e}"));
                Outcome::Failed
            }
        }
    }

    /// Flip a task's completion flag on the server.
    pub async fn toggle(&self, id: i64) -> Outcome {
        debug!("toggling task {id}");
        match self.service.toggle_task(id).await {
            Ok(()) => {
                self.fetch_all().await;
                Outcome::Done
            }
            Err(e) => {
                warn!("error toggling task {id}: {e}");
                self.lock()
                    .notify(NoticeKind::Error, format!("Failed to toggle task: {e}"));
                Outcome::Failed
            }
        }
    }

    /// The yes/no question asked before deleting `id`.
    pub fn delete_prompt(&self, id: i64) -> String {
        let state = self.lock();
        let name = state
            .find_task(id)
            .map(|t| t.title.as_str())
            .unwrap_or("this task");
        format!("Are you sure you want to delete \"{name}\"?")
    }

    /// Delete a task after `confirm` approves the prompt.
    pub async fn delete(&self, id: i64, confirm: impl FnOnce(&str) -> bool) -> Outcome {
        let prompt = self.delete_prompt(id);
        if !confirm(&prompt) {
            return Outcome::Cancelled;
        }

        debug!("deleting task {id}");
        match self.service.delete_task(id).await {
            Ok(()) => {
                self.lock()
                    .notify(NoticeKind::Success, "Task deleted successfully!");
                self.fetch_all().await;
                Outcome::Done
            }
            Err(e) => {
                warn!("error deleting task {id}: {e}");
                self.lock()
                    .notify(NoticeKind::Error, format!("Failed to delete task: {e}"));
                Outcome::Failed
            }
        }
    }
}
