// Database schema: table creation and migrations.
//
// `schema_version` records which migrations ran; later migrations are
// guarded by their number.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet. Idempotent.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Append-only log of one-vs-corpus checks. No UPDATE or DELETE
        -- queries exist for this table.
        CREATE TABLE IF NOT EXISTS check_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identifier TEXT NOT NULL,          -- sanitised file name of the checked document
            lexical_score REAL NOT NULL,       -- 0.0 to 100.0
            semantic_score REAL NOT NULL,      -- 0.0 to 100.0
            checked_at TEXT NOT NULL           -- RFC 3339, UTC
        );

        CREATE INDEX IF NOT EXISTS idx_results_identifier
            ON check_results(identifier);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, check_results
        assert_eq!(table_count(&conn).unwrap(), 2i64);
    }
}
