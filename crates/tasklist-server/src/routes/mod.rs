pub mod health;
pub mod todos;

use std::sync::Arc;

use axum::Router;
use tasklist_db::Database;
use tower_http::cors::CorsLayer;

pub struct InnerAppState {
    pub db: Arc<dyn Database>,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(db: Arc<dyn Database>) -> Router {
    let state = Arc::new(InnerAppState { db });
    Router::new()
        .merge(health::routes())
        .merge(todos::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
