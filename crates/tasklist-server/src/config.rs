use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tasklist_db::DbConfig;

#[derive(Debug, Parser)]
#[command(name = "tasklist-server", about = "Todo list REST backend")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TASKLIST_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "TASKLIST_PORT", default_value = "5050")]
    pub port: u16,

    /// SQLite database file (defaults to the user data directory)
    #[arg(long, env = "TASKLIST_DB")]
    pub db: Option<PathBuf>,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            sqlite_path: self.db.clone(),
        }
    }
}
