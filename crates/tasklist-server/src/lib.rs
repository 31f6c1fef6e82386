pub mod config;
mod routes;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use tasklist_db::Database;
use tokio::net::TcpListener;
use tracing::info;

pub use routes::build_router;

pub async fn serve(listener: TcpListener, db: Arc<dyn Database>) -> Result<()> {
    let app = routes::build_router(db);
    info!("tasklist-server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
