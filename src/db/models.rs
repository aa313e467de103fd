// Row types for the result log, kept free of rusqlite so other modules can
// use them without touching the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A check outcome about to be appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub identifier: String,
    pub lexical_score: f64,
    pub semantic_score: f64,
    pub checked_at: DateTime<Utc>,
}

impl NewLogEntry {
    pub fn now(identifier: impl Into<String>, lexical_score: f64, semantic_score: f64) -> Self {
        Self {
            identifier: identifier.into(),
            lexical_score,
            semantic_score,
            checked_at: Utc::now(),
        }
    }
}

/// A row read back from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub identifier: String,
    pub lexical_score: f64,
    pub semantic_score: f64,
    pub checked_at: DateTime<Utc>,
}
