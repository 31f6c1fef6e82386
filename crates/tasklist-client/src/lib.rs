//! Client side of the todo list: a store that mirrors the server's task
//! collection and a renderer that turns the mirror into a page.
//!
//! Every successful mutation is followed by a full re-fetch; the local
//! snapshot is only ever replaced wholesale.

pub mod config;
pub mod render;
pub mod state;
pub mod store;

pub use config::ClientConfig;
pub use render::{render, render_html, render_page, ListView, PageView, Stats};
pub use state::{ClientState, FetchTicket, LoadState, Notice, NoticeKind};
pub use store::{FetchOutcome, Outcome, TaskStore};
