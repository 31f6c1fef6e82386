//! State machine tests for the TUI App.
//!
//! Each test spawns a test server on a separate thread (App drives its own
//! tokio runtime, so the server must live in another thread's runtime),
//! builds an App against it and simulates key events.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tasklist_client::{ClientConfig, NoticeKind};
use tasklist_service::ConnectionStatus;
use tasklist_tui::app::{App, Mode};

/// Spawn the test server on a separate thread, return the API URL.
fn spawn_server() -> String {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let server = tasklist_server::test_helpers::spawn_test_server().await;
            tx.send(server.api_url()).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn make_app() -> App {
    let config = ClientConfig {
        api_url: spawn_server(),
    };
    App::new(&config).unwrap()
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.handle_key(char_key(c));
    }
}

fn add_task(app: &mut App, title: &str) {
    app.handle_key(char_key('n'));
    type_str(app, title);
    app.handle_key(key(KeyCode::Enter));
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// ---- State transition tests ----

#[test]
fn app_starts_normal_and_connected() {
    let app = make_app();
    assert_eq!(app.mode(), &Mode::Normal);
    assert_eq!(app.connection(), &ConnectionStatus::Connected);
    assert!(screen(&app).contains("No tasks yet. Add one above!"));
}

#[test]
fn n_and_i_enter_input() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    assert!(app.is_input_mode());
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.mode(), &Mode::Normal);
    app.handle_key(char_key('i'));
    assert!(app.is_input_mode());
}

#[test]
fn esc_keeps_typed_text() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    type_str(&mut app, "draft");
    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.store().state().input(), "draf");
}

#[test]
fn q_only_quits_from_normal() {
    let mut app = make_app();
    assert!(app.should_quit(char_key('q')));
    app.handle_key(char_key('n'));
    assert!(!app.should_quit(char_key('q')));
    assert!(app.should_quit(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL
    )));
}

#[test]
fn enter_adds_task_and_returns_to_normal() {
    let mut app = make_app();
    add_task(&mut app, "Task 1");

    assert_eq!(app.mode(), &Mode::Normal);
    assert_eq!(app.store().state().input(), "");
    assert_eq!(app.store().page().stats.total_label(), "1 task");
    let screen = screen(&app);
    assert!(screen.contains("Task 1"));
    assert!(screen.contains("Task added successfully!"));
}

#[test]
fn blank_enter_stays_in_input_with_warning() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    type_str(&mut app, "   ");
    app.handle_key(key(KeyCode::Enter));

    assert!(app.is_input_mode());
    assert_eq!(app.store().state().total(), 0);
    let notice = app.store().state().notice().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.text, "Please enter a task");
}

#[test]
fn new_task_is_selected() {
    let mut app = make_app();
    add_task(&mut app, "first");
    add_task(&mut app, "second");
    let second = app.store().state().tasks()[1].id;
    assert_eq!(app.selected_id(), Some(second));
}

#[test]
fn space_toggles_selected_task() {
    let mut app = make_app();
    add_task(&mut app, "Task 1");
    add_task(&mut app, "Task 2");
    app.handle_key(char_key('k'));

    app.handle_key(char_key(' '));
    let page = app.store().page();
    assert_eq!(page.stats.completed_label(), "1 completed");
    assert!(app.store().state().tasks()[0].completed);

    app.handle_key(char_key('t'));
    assert!(!app.store().state().tasks()[0].completed);
}

#[test]
fn d_asks_for_confirmation_naming_task() {
    let mut app = make_app();
    add_task(&mut app, "Task 2");
    app.handle_key(char_key('d'));

    match app.mode() {
        Mode::ConfirmDelete { prompt, .. } => {
            assert_eq!(prompt, "Are you sure you want to delete \"Task 2\"?")
        }
        other => panic!("expected ConfirmDelete, got {other:?}"),
    }
    assert!(screen(&app).contains("Confirm Delete"));
}

#[test]
fn any_other_key_declines_delete() {
    let mut app = make_app();
    add_task(&mut app, "Keep");
    app.handle_key(char_key('d'));
    app.handle_key(char_key('n'));

    assert_eq!(app.mode(), &Mode::Normal);
    assert_eq!(app.store().state().total(), 1);
}

#[test]
fn y_deletes_selected_task() {
    let mut app = make_app();
    add_task(&mut app, "Task 1");
    add_task(&mut app, "Task 2");
    app.handle_key(char_key('d'));
    app.handle_key(char_key('y'));

    assert_eq!(app.mode(), &Mode::Normal);
    let state = app.store().state();
    assert_eq!(state.total(), 1);
    assert_eq!(state.tasks()[0].title, "Task 1");
    assert_eq!(state.notice().unwrap().text, "Task deleted successfully!");
    assert_eq!(app.selected_id(), Some(state.tasks()[0].id));
}

#[test]
fn d_on_empty_list_does_nothing() {
    let mut app = make_app();
    app.handle_key(char_key('d'));
    assert_eq!(app.mode(), &Mode::Normal);
}

#[test]
fn tick_expires_notice() {
    let mut app = make_app();
    add_task(&mut app, "x");
    assert!(!app.tick(Instant::now()));
    assert!(app.tick(Instant::now() + Duration::from_secs(4)));
    assert!(app.store().state().notice().is_none());
}

#[test]
fn r_reloads_from_server() {
    let mut app = make_app();
    add_task(&mut app, "x");
    app.handle_key(char_key('r'));
    let state = app.store().state();
    assert_eq!(state.total(), 1);
    let notice = state.notice().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.text, "Tasks reloaded");
}

#[test]
fn r_against_unreachable_server_shows_no_reload_notice() {
    let config = ClientConfig {
        api_url: "http://127.0.0.1:9/api".into(),
    };
    let mut app = App::new(&config).unwrap();
    app.handle_key(char_key('r'));
    assert!(app.store().state().notice().is_none());
}

#[test]
fn very_long_input_renders_without_overflow() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    type_str(&mut app, &"x".repeat(300));
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let cursor = terminal.get_cursor_position().unwrap();
    assert_eq!(cursor.x, 78);
    assert_eq!(cursor.y, 2);
}

#[test]
fn unreachable_server_shows_error() {
    let config = ClientConfig {
        api_url: "http://127.0.0.1:9/api".into(),
    };
    let app = App::new(&config).unwrap();
    assert!(matches!(app.connection(), ConnectionStatus::Failed(_)));
    let screen = screen(&app);
    assert!(screen.contains("Connection failed"));
    assert!(screen.contains("Failed to load tasks"));
}

#[test]
fn html_snapshot_reflects_server_state() {
    let mut app = make_app();
    add_task(&mut app, "<b>x</b>");
    let html = app.html();
    assert!(html.contains("<title>Todo List App</title>"));
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(html.contains(r#"<span id="total-count">1 task</span>"#));
}
