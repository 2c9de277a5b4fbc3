//! DeleteTask command

use super::require_task;
use crate::dependency::clear_edges;
use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::TaskId;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a task together with every dependency edge touching it.
///
/// Remaining tasks in the bucket are closed up so positions stay dense.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

operation!(
    DeleteTask,
    verb = "delete",
    noun = "task",
    description = "Delete a task and its dependency edges"
);

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for DeleteTask {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let edges = store.transaction(|tx| {
            let task = require_task(tx, &self.id)?;
            let edges = clear_edges(tx, &task.id)?;
            tx.execute("DELETE FROM tasks WHERE id = ?1", params![task.id])?;
            tx.execute(
                "UPDATE tasks SET position = position - 1 WHERE status = ?1 AND position > ?2",
                params![task.status, task.position],
            )?;
            Ok(edges)
        })?;

        info!(task = %self.id, edges, "Deleted task");
        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
            "dependencies_removed": edges,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{AddDependency, ListDependencies};
    use crate::error::BoardError;
    use crate::task::test_support::{add_task, layout};

    #[test]
    fn test_delete_task_closes_gap() {
        let store = BoardStore::open_in_memory().unwrap();
        add_task(&store, "A", "todo");
        let b = add_task(&store, "B", "todo");
        add_task(&store, "C", "todo");

        DeleteTask::new(&b).execute(&store).unwrap();
        assert_eq!(
            layout(&store),
            vec![
                ("A".to_string(), "todo".to_string(), 0),
                ("C".to_string(), "todo".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_delete_task_removes_edges() {
        let store = BoardStore::open_in_memory().unwrap();
        let a = add_task(&store, "A", "todo");
        let b = add_task(&store, "B", "todo");
        let c = add_task(&store, "C", "todo");
        AddDependency::new(&a, &b).execute(&store).unwrap();
        AddDependency::new(&b, &c).execute(&store).unwrap();

        let result = DeleteTask::new(&b).execute(&store).unwrap();
        assert_eq!(result["dependencies_removed"], 2);

        let remaining = ListDependencies::all().execute(&store).unwrap();
        assert!(remaining["dependencies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_task() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = DeleteTask::new("ghost").execute(&store);
        assert!(matches!(result, Err(BoardError::NotFound { .. })));
    }
}
