// SqliteResultLog: rusqlite backend implementing the ResultLog trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{LogEntry, NewLogEntry};
use super::traits::ResultLog;

pub struct SqliteResultLog {
    conn: Mutex<Connection>,
}

impl SqliteResultLog {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl ResultLog for SqliteResultLog {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn append(&self, entry: &NewLogEntry) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::append_result(&conn, entry)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().await;
        super::queries::recent_results(&conn, limit)
    }

    async fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_results(&conn)
    }
}
