// Database layer: the append-only SQLite result log.
//
// rusqlite with the "bundled" feature, so there's no system SQLite
// dependency. The file lives wherever DRAFTCHECK_DB_PATH points
// (defaults to ./draftcheck.db).

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

pub use models::{LogEntry, NewLogEntry};
pub use sqlite::SqliteResultLog;
pub use traits::ResultLog;

/// Open (or create) the database and run migrations.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `draftcheck init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    // Tables may predate a newer schema
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing SQLite result log behind the trait.
pub fn open_sqlite(db_path: &str) -> Result<Arc<dyn ResultLog>> {
    Ok(Arc::new(SqliteResultLog::new(open(db_path)?)))
}

/// Create (if needed) and open the SQLite result log behind the trait.
pub fn initialize_sqlite(db_path: &str) -> Result<Arc<dyn ResultLog>> {
    Ok(Arc::new(SqliteResultLog::new(initialize(db_path)?)))
}

/// A throwaway in-memory log.
pub fn in_memory() -> Result<Arc<dyn ResultLog>> {
    let conn = Connection::open_in_memory()?;
    schema::create_tables(&conn)?;
    Ok(Arc::new(SqliteResultLog::new(conn)))
}
