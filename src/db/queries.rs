// Result-log queries. All SQL lives here; the rest of the crate goes
// through the ResultLog trait.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::models::{LogEntry, NewLogEntry};

/// Append one check result and return its row id.
pub fn append_result(conn: &Connection, entry: &NewLogEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO check_results (identifier, lexical_score, semantic_score, checked_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.identifier,
            entry.lexical_score,
            entry.semantic_score,
            entry.checked_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent results first.
pub fn recent_results(conn: &Connection, limit: u32) -> Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, identifier, lexical_score, semantic_score, checked_at
         FROM check_results
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, identifier, lexical_score, semantic_score, checked_at) = row?;
        let checked_at = DateTime::parse_from_rfc3339(&checked_at)
            .with_context(|| format!("Bad timestamp in check_results row {id}"))?
            .with_timezone(&Utc);
        entries.push(LogEntry {
            id,
            identifier,
            lexical_score,
            semantic_score,
            checked_at,
        });
    }
    Ok(entries)
}

pub fn count_results(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM check_results", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_append_and_read_back() {
        let conn = test_db();
        let entry = NewLogEntry::now("essay.txt", 42.5, 87.25);
        let id = append_result(&conn, &entry).unwrap();

        let rows = recent_results(&conn, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].identifier, "essay.txt");
        assert!((rows[0].lexical_score - 42.5).abs() < f64::EPSILON);
        assert!((rows[0].semantic_score - 87.25).abs() < f64::EPSILON);
        assert_eq!(rows[0].checked_at.timestamp(), entry.checked_at.timestamp());
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let conn = test_db();
        for name in ["a.txt", "b.txt", "c.txt"] {
            append_result(&conn, &NewLogEntry::now(name, 1.0, 2.0)).unwrap();
        }

        let rows = recent_results(&conn, 2).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(names, vec!["c.txt", "b.txt"]);
        assert_eq!(count_results(&conn).unwrap(), 3);
    }

    #[test]
    fn test_same_identifier_appends_new_rows() {
        let conn = test_db();
        append_result(&conn, &NewLogEntry::now("essay.txt", 10.0, 20.0)).unwrap();
        append_result(&conn, &NewLogEntry::now("essay.txt", 30.0, 40.0)).unwrap();
        assert_eq!(count_results(&conn).unwrap(), 2);
    }
}
