//! ListDependencies command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::task::require_task;
use crate::types::{DependencyEdge, TaskId};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List dependency edges, either all of them or those touching one task
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListDependencies {
    pub task_id: Option<TaskId>,
}

operation!(
    ListDependencies,
    verb = "list",
    noun = "dependencies",
    description = "List dependency edges",
    read_only
);

impl ListDependencies {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_task(task_id: impl Into<TaskId>) -> Self {
        Self {
            task_id: Some(task_id.into()),
        }
    }
}

impl Execute for ListDependencies {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let select = format!("SELECT {} FROM dependencies", DependencyEdge::FIELDS);

        let Some(task_id) = &self.task_id else {
            let edges = store.query_many(
                &format!("{} ORDER BY created_at, id", select),
                [],
                DependencyEdge::from_row,
            )?;
            return Ok(serde_json::json!({ "dependencies": edges }));
        };

        require_task(store.connection(), task_id)?;
        let predecessors = store.query_many(
            &format!("{} WHERE successor_id = ?1 ORDER BY created_at, id", select),
            params![task_id],
            DependencyEdge::from_row,
        )?;
        let successors = store.query_many(
            &format!("{} WHERE predecessor_id = ?1 ORDER BY created_at, id", select),
            params![task_id],
            DependencyEdge::from_row,
        )?;
        Ok(serde_json::json!({
            "task_id": task_id,
            "predecessors": predecessors,
            "successors": successors,
        }))
    }
}
