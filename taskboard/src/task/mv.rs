//! MoveTask command

use super::{grouping_after_move, next_task_position, require_task};
use crate::column::order::require_column;
use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, TaskId};
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Move a task to a different column.
///
/// Dropping a task into a column scoped to a grouping re-files the task into
/// that grouping. Status, grouping and position change in one transaction, so
/// no reader ever sees the new status with the old grouping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Destination column
    pub status: ColumnId,
}

operation!(
    MoveTask,
    verb = "move",
    noun = "task",
    description = "Move a task to a different column"
);

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, status: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

impl Execute for MoveTask {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let task = store.transaction(|tx| {
            let mut task = require_task(tx, &self.id)?;
            let column = require_column(tx, &self.status)?;
            if task.status == self.status {
                return Ok(task);
            }

            let from = task.status.clone();
            let vacated = task.position;
            task.grouping_id = grouping_after_move(&column, task.grouping_id.as_ref());
            task.position = next_task_position(tx, &self.status)?;
            task.status = self.status.clone();
            task.updated_at = Utc::now();

            tx.execute(
                "UPDATE tasks SET status = ?2, grouping_id = ?3, position = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    task.id,
                    task.status,
                    task.grouping_id,
                    task.position,
                    task.updated_at
                ],
            )?;
            tx.execute(
                "UPDATE tasks SET position = position - 1 WHERE status = ?1 AND position > ?2",
                params![from, vacated],
            )?;
            info!(
                task = %task.id,
                from = %from,
                to = %task.status,
                grouping = ?task.grouping_id,
                "Moved task"
            );
            Ok(task)
        })?;

        Ok(serde_json::to_value(&task)?)
    }
}
