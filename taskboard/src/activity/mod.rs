//! Activity log storage and the ListActivity command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::LogEntry;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append an entry to the activity table
pub(crate) fn record(conn: &Connection, entry: &LogEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO activity (id, timestamp, op, input, output, actor, duration_ms)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id,
            entry.timestamp,
            entry.op,
            serde_json::to_string(&entry.input)?,
            serde_json::to_string(&entry.output)?,
            entry.actor,
            i64::try_from(entry.duration_ms).unwrap_or(i64::MAX)
        ],
    )?;
    Ok(())
}

/// Read activity entries, newest first
pub fn read_activity(conn: &Connection, limit: Option<usize>) -> Result<Vec<LogEntry>> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM activity ORDER BY rowid DESC LIMIT ?1",
        LogEntry::FIELDS
    ))?;
    let rows = stmt.query_map(params![limit], LogEntry::from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// List recent activity, newest first
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListActivity {
    /// Maximum number of entries
    pub limit: Option<usize>,
}

operation!(
    ListActivity,
    verb = "list",
    noun = "activity",
    description = "List recent board activity",
    read_only
);

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Execute for ListActivity {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let entries = read_activity(store.connection(), self.limit)?;
        Ok(serde_json::json!({
            "entries": entries,
            "count": entries.len(),
        }))
    }
}
