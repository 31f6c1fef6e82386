use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tasklist_db::SqliteDatabase;
use tasklist_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let db_path = config
        .db
        .clone()
        .unwrap_or_else(SqliteDatabase::default_path);
    info!("database: {}", db_path.display());
    let db = SqliteDatabase::open(&config.db_config())?;

    let listener = TcpListener::bind(config.addr()).await?;
    tasklist_server::serve(listener, Arc::new(db)).await
}
