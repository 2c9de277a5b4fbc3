//! Task type

use super::ids::{ColumnId, GroupingId, TaskId};
use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// The grouping this task is filed under, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_id: Option<GroupingId>,
    /// The column the task currently sits in
    pub status: ColumnId,
    /// Dense position within the status bucket
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub(crate) const FIELDS: &'static str =
        "id, title, grouping_id, status, position, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            grouping_id: row.get(2)?,
            status: row.get(3)?,
            position: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}
