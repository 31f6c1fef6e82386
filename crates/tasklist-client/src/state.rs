use std::time::{Duration, Instant};

use tasklist_core::task::Task;

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Where the list area is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// The most recent fetch failed; holds the failure text.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

/// A transient message shown next to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// Identifies one issued fetch. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Everything the page shows, owned by the store.
#[derive(Debug, Clone)]
pub struct ClientState {
    tasks: Vec<Task>,
    load: LoadState,
    has_loaded: bool,
    input: String,
    notice: Option<Notice>,
    issued: u64,
    applied: u64,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            load: LoadState::Loading,
            has_loaded: false,
            input: String::new(),
            notice: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find_task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// True once any fetch has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replaces any current notice.
    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drops the notice once it has been visible for `NOTICE_TTL`.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
            return true;
        }
        false
    }

    /// Marks a fetch as in flight and returns its ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.load = LoadState::Loading;
        FetchTicket(self.issued)
    }

    /// Applies a fetch result unless a newer fetch has already been applied.
    ///
    /// On failure the previous snapshot is kept and the error is recorded.
    /// Returns whether the result was applied.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Task>, String>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.has_loaded = true;
                self.load = LoadState::Loaded;
            }
            Err(message) => self.load = LoadState::Error(message),
        }
        true
    }
}
