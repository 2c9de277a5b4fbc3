//! ClearTaskDependencies command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::TaskId;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Remove every edge where the task is predecessor or successor.
///
/// Edges that merely passed through the task are not bridged: after clearing
/// `b` in `a -> b -> c`, `a` and `c` are unrelated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClearTaskDependencies {
    pub task_id: TaskId,
}

operation!(
    ClearTaskDependencies,
    verb = "clear",
    noun = "dependencies",
    description = "Remove all dependency edges touching a task"
);

impl ClearTaskDependencies {
    pub fn new(task_id: impl Into<TaskId>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }
}

impl Execute for ClearTaskDependencies {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let removed = store.transaction(|tx| clear_edges(tx, &self.task_id))?;
        Ok(serde_json::json!({
            "task_id": self.task_id,
            "removed": removed,
        }))
    }
}

/// Delete all edges touching `task`, returning how many were removed
pub(crate) fn clear_edges(conn: &Connection, task: &TaskId) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM dependencies WHERE predecessor_id = ?1 OR successor_id = ?1",
        params![task],
    )?;
    debug!(task = %task, removed, "Cleared dependencies");
    Ok(removed)
}
