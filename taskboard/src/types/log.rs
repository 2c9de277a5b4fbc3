//! Activity log entry

use super::ids::LogEntryId;
use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record of one mutating operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this log entry (ULID format)
    pub id: LogEntryId,

    /// When the operation occurred
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "add column", "move task")
    pub op: String,

    /// The normalized input parameters (as JSON)
    pub input: Value,

    /// The result value or error (as JSON)
    pub output: Value,

    /// Who performed the operation.
    /// Format: "user_id" or "agent_name[session_id]"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// How long the operation took (milliseconds)
    pub duration_ms: u64,
}

impl LogEntry {
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor,
            duration_ms,
        }
    }

    pub(crate) const FIELDS: &'static str = "id, timestamp, op, input, output, actor, duration_ms";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let input: String = row.get(3)?;
        let output: String = row.get(4)?;
        let duration_ms: i64 = row.get(6)?;
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            op: row.get(2)?,
            input: serde_json::from_str(&input).unwrap_or(Value::String(input)),
            output: serde_json::from_str(&output).unwrap_or(Value::String(output)),
            actor: row.get(5)?,
            duration_ms: duration_ms.max(0) as u64,
        })
    }
}
