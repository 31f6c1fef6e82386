//! End-to-end flows: a TaskStore driving a real server over HTTP.

use std::sync::Arc;

use tasklist_client::{render_html, ListView, NoticeKind, Outcome, TaskStore};
use tasklist_db::SqliteDatabase;
use tasklist_service::{HttpService, LocalService};

async fn http_store() -> TaskStore<HttpService> {
    let server = tasklist_server::test_helpers::spawn_test_server().await;
    let url = server.api_url();
    TaskStore::new(HttpService::new(&url), url)
}

fn row_titles(store: &TaskStore<HttpService>) -> Vec<String> {
    match store.page().list {
        ListView::Rows(rows) => rows.into_iter().map(|r| r.title).collect(),
        _ => Vec::new(),
    }
}

#[tokio::test]
async fn add_toggle_delete_scenario() {
    let store = http_store().await;
    store.fetch_all().await;
    assert_eq!(store.page().list, ListView::Empty);
    assert_eq!(store.page().stats.total_label(), "0 tasks");

    store.set_input("Task 1");
    assert_eq!(store.submit().await, Outcome::Done);
    assert_eq!(store.page().stats.total_label(), "1 task");

    store.set_input("Task 2");
    assert_eq!(store.submit().await, Outcome::Done);
    assert_eq!(store.page().stats.total_label(), "2 tasks");
    assert_eq!(row_titles(&store), vec!["Task 1", "Task 2"]);

    let task1 = store.state().tasks()[0].id;
    assert_eq!(store.toggle(task1).await, Outcome::Done);
    assert_eq!(store.page().stats.completed_label(), "1 completed");

    let task2 = store.state().tasks()[1].id;
    let outcome = store
        .delete(task2, |prompt| {
            assert_eq!(prompt, "Are you sure you want to delete \"Task 2\"?");
            true
        })
        .await;
    assert_eq!(outcome, Outcome::Done);

    let page = store.page();
    assert_eq!(page.stats.total_label(), "1 task");
    assert_eq!(page.stats.completed_label(), "1 completed");
    assert_eq!(page.notice.unwrap().text, "Task deleted successfully!");
}

#[tokio::test]
async fn submitted_title_is_trimmed() {
    let store = http_store().await;
    store.fetch_all().await;
    store.set_input("   Water the plants  ");
    store.submit().await;
    assert_eq!(row_titles(&store), vec!["Water the plants"]);
}

#[tokio::test]
async fn blank_input_adds_no_row() {
    let store = http_store().await;
    store.fetch_all().await;
    store.set_input("    ");
    assert_eq!(store.submit().await, Outcome::Rejected);
    assert_eq!(store.page().list.row_count(), 0);
    assert_eq!(
        store.state().notice().map(|n| n.kind),
        Some(NoticeKind::Warning)
    );
}

#[tokio::test]
async fn declined_delete_keeps_row() {
    let store = http_store().await;
    store.create("Keep me").await;
    let id = store.state().tasks()[0].id;

    assert_eq!(store.delete(id, |_| false).await, Outcome::Cancelled);
    store.fetch_all().await;
    assert_eq!(row_titles(&store), vec!["Keep me"]);
}

#[tokio::test]
async fn double_toggle_restores_row_markup() {
    let store = http_store().await;
    store.create("Flip").await;
    let id = store.state().tasks()[0].id;
    let before = render_html(&store.page(), "");

    store.toggle(id).await;
    assert!(render_html(&store.page(), "").contains("todo-item completed"));
    store.toggle(id).await;
    assert_eq!(render_html(&store.page(), ""), before);
}

#[tokio::test]
async fn toggling_deleted_task_reports_not_found() {
    let store = http_store().await;
    store.create("Gone soon").await;
    let id = store.state().tasks()[0].id;
    store.delete(id, |_| true).await;

    assert_eq!(store.toggle(id).await, Outcome::Failed);
    let notice = store.state().notice().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.starts_with("Failed to toggle task:"));
}

#[tokio::test]
async fn unreachable_server_shows_error_state() {
    let url = "http://127.0.0.1:9/api";
    let store = TaskStore::new(HttpService::new(url), url);
    store.fetch_all().await;

    let html = render_html(&store.page(), "");
    assert!(html.contains(r#"<li class="error">Failed to load tasks:"#));
    assert!(html.contains("API: http://127.0.0.1:9/api"));
}

#[tokio::test]
async fn local_service_drives_the_same_flow() {
    let db = Arc::new(SqliteDatabase::open_in_memory().unwrap());
    let store = TaskStore::new(LocalService::new(db), "local");
    store.fetch_all().await;

    store.create("Local task").await;
    let id = store.state().tasks()[0].id;
    store.toggle(id).await;

    let page = store.page();
    assert_eq!(page.stats.total_label(), "1 task");
    assert_eq!(page.stats.completed_label(), "1 completed");
}
