// SQLite persistence. Free functions over a shared connection, grouped by
// area; callers hold the lock and pass `&Connection` in.

pub mod collection;
pub mod history;
pub mod schema;
pub mod sets;
pub mod settings;
pub mod tags;
pub mod wishlist;

use crate::utils::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Opens (creating when necessary) the collection database at `path`.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute("PRAGMA foreign_keys = ON;", [])?;
    schema::create_tables(&conn)?;
    schema::migrate_database(&conn)?;
    Ok(conn)
}

/// In-memory database with the full schema, for tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute("PRAGMA foreign_keys = ON;", [])?;
    schema::create_tables(&conn)?;
    Ok(conn)
}
