//! Turns a [`ClientState`] into a page.
//!
//! [`render`] is pure and produces a structured [`PageView`]; the HTML
//! functions format that view with the element ids and classes the page's
//! stylesheet and browser tests select on.

use std::fmt::Write as _;

use crate::state::{ClientState, LoadState, Notice};

pub const EMPTY_TEXT: &str = "No tasks yet. Add one above!";
pub const LOADING_TEXT: &str = "Loading tasks...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl RowView {
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Undo"
        } else {
            "Complete"
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Nothing has loaded yet.
    Loading,
    Empty,
    Rows(Vec<RowView>),
    /// The latest fetch failed.
    Error { message: String, api_url: String },
}

impl ListView {
    /// Number of real task rows, excluding placeholders.
    pub fn row_count(&self) -> usize {
        match self {
            ListView::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
}

impl Stats {
    /// "1 task", otherwise "N tasks".
    pub fn total_label(&self) -> String {
        if self.total == 1 {
            "1 task".to_string()
        } else {
            format!("{} tasks", self.total)
        }
    }

    pub fn completed_label(&self) -> String {
        format!("{} completed", self.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub list: ListView,
    pub stats: Stats,
    pub notice: Option<Notice>,
}

pub fn render(state: &ClientState, api_url: &str) -> PageView {
    let list = match state.load_state() {
        LoadState::Error(message) => ListView::Error {
            message: format!("Failed to load tasks: {message}"),
            api_url: api_url.to_string(),
        },
        _ if !state.has_loaded() => ListView::Loading,
        _ if state.tasks().is_empty() => ListView::Empty,
        _ => ListView::Rows(
            state
                .tasks()
                .iter()
                .map(|t| RowView {
                    id: t.id,
                    title: t.title.clone(),
                    completed: t.completed,
                })
                .collect(),
        ),
    };

    PageView {
        list,
        stats: Stats {
            total: state.total(),
            completed: state.completed(),
        },
        notice: state.notice().cloned(),
    }
}

/// The app container: input, list, stats and any notice.
pub fn render_html(page: &PageView, input: &str) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="container">"#);
    html.push_str("<h1>Todo List</h1>");

    if let Some(notice) = &page.notice {
        let _ = write!(
            html,
            r#"<div class="temp-message {}">{}</div>"#,
            notice.kind.as_str(),
            html_escape(&notice.text)
        );
    }

    html.push_str(r#"<div class="input-section">"#);
    let _ = write!(
        html,
        r#"<input type="text" id="todo-input" placeholder="Enter a new task..." value="{}" />"#,
        html_escape(input)
    );
    html.push_str(r#"<button id="add-btn">Add Task</button></div>"#);

    html.push_str(r#"<ul id="todo-list">"#);
    match &page.list {
        ListView::Loading => {
            let _ = write!(html, r#"<li class="loading">{LOADING_TEXT}</li>"#);
        }
        ListView::Empty => {
            let _ = write!(html, r#"<li class="empty">{EMPTY_TEXT}</li>"#);
        }
        ListView::Error { message, api_url } => {
            let _ = write!(
                html,
                r#"<li class="error">{}<br><small>API: {}</small></li>"#,
                html_escape(message),
                html_escape(api_url)
            );
        }
        ListView::Rows(rows) => {
            for row in rows {
                let class = if row.completed {
                    "todo-item completed"
                } else {
                    "todo-item"
                };
                let _ = write!(
                    html,
                    r#"<li class="{class}" data-id="{id}"><span class="todo-text">{title}</span><div class="todo-actions"><button class="toggle-btn" data-id="{id}">{label}</button><button class="delete-btn" data-id="{id}">Delete</button></div></li>"#,
                    id = row.id,
                    title = html_escape(&row.title),
                    label = row.toggle_label(),
                );
            }
        }
    }
    html.push_str("</ul>");

    let _ = write!(
        html,
        r#"<div class="stats"><span id="total-count">{}</span><span id="completed-count">{}</span></div>"#,
        page.stats.total_label(),
        page.stats.completed_label()
    );
    html.push_str("</div>");
    html
}

/// A standalone document wrapping [`render_html`].
pub fn render_page(page: &PageView, input: &str) -> String {
    let mut doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str("<title>Todo List App</title>\n</head>\n<body>\n");
    doc.push_str(&render_html(page, input));
    doc.push_str("\n</body>\n</html>\n");
    doc
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
