use rusqlite::Connection;

use super::map_sqlite_err;
use crate::DbError;

pub fn run(conn: &Connection) -> Result<(), DbError> {
    // `id` is a plain INTEGER PRIMARY KEY (no AUTOINCREMENT): new rows get
    // max(id) + 1, matching how ids were handed out before the move to SQLite.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id         INTEGER PRIMARY KEY,
            title      TEXT NOT NULL CHECK(length(trim(title)) > 0),
            completed  INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .map_err(map_sqlite_err)
}
