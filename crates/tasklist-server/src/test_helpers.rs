use std::sync::Arc;

use axum::Router;
use tasklist_db::SqliteDatabase;
use tokio::net::TcpListener;

/// Build a router over a fresh in-memory SQLite database.
pub fn test_router() -> Router {
    let db = Arc::new(SqliteDatabase::open_in_memory().unwrap());
    crate::routes::build_router(db)
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    /// Server root, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// The address a client should be configured with.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

/// Spawn an axum test server on a random port.
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = test_router();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
