// ResultLog trait: backend-agnostic async interface to the result log.
//
// Async so a synchronous rusqlite connection (behind a Mutex) and any future
// native-async backend fit the same signature.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{LogEntry, NewLogEntry};

#[async_trait]
pub trait ResultLog: Send + Sync {
    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Append one result. Returns the new row id.
    async fn append(&self, entry: &NewLogEntry) -> Result<i64>;

    /// The most recent `limit` results, newest first.
    async fn recent(&self, limit: u32) -> Result<Vec<LogEntry>>;

    /// Total number of logged results.
    async fn count(&self) -> Result<i64>;
}
