//! AddTask command

use super::{grouping_after_move, next_task_position};
use crate::column::order::require_column;
use crate::defaults::TODO;
use crate::error::{Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, GroupingId, Task, TaskId};
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Add a new task at the end of its status bucket
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTask {
    /// The task title
    pub title: String,
    /// Starting column; defaults to `todo`
    pub status: Option<ColumnId>,
    /// Grouping to file the task under
    pub grouping_id: Option<GroupingId>,
}

operation!(
    AddTask,
    verb = "add",
    noun = "task",
    description = "Create a new task"
);

impl AddTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
            grouping_id: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_grouping(mut self, grouping: impl Into<GroupingId>) -> Self {
        self.grouping_id = Some(grouping.into());
        self
    }
}

impl Execute for AddTask {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyName { field: "title" }.into());
        }
        let status = self
            .status
            .clone()
            .unwrap_or_else(|| ColumnId::from_string(TODO));

        let task = store.transaction(|tx| {
            let column = require_column(tx, &status)?;
            let now = Utc::now();
            let task = Task {
                id: TaskId::new(),
                title: title.to_string(),
                grouping_id: grouping_after_move(&column, self.grouping_id.as_ref()),
                position: next_task_position(tx, &status)?,
                status: status.clone(),
                created_at: now,
                updated_at: now,
            };
            tx.execute(
                "INSERT INTO tasks (id, title, grouping_id, status, position, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    task.id,
                    task.title,
                    task.grouping_id,
                    task.status,
                    task.position,
                    task.created_at,
                    task.updated_at
                ],
            )?;
            Ok(task)
        })?;

        debug!(task = %task.id, status = %task.status, position = task.position, "Added task");
        Ok(serde_json::to_value(&task)?)
    }
}
