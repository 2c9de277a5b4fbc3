//! ReorderTasks command

use super::{grouping_after_move, require_task, resequence};
use crate::column::order::require_column;
use crate::error::{Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, TaskId};
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

/// Assign dense positions to tasks in the given order.
///
/// With `status`, every listed task also lands in that column (a drag that
/// both reorders and changes bucket). Tasks already in the column but not
/// listed follow the listed ones, and the buckets the listed tasks came from
/// are closed up. Either every row is renumbered or, on any failure, none is.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderTasks {
    /// Task ids in their new order
    pub ids: Vec<TaskId>,
    /// Column all listed tasks end up in
    pub status: Option<ColumnId>,
}

operation!(
    ReorderTasks,
    verb = "reorder",
    noun = "tasks",
    description = "Renumber tasks in the given order"
);

impl ReorderTasks {
    pub fn new(ids: Vec<TaskId>) -> Self {
        Self { ids, status: None }
    }

    pub fn in_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl Execute for ReorderTasks {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let mut seen = HashSet::with_capacity(self.ids.len());
        for id in &self.ids {
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateId { id: id.to_string() }.into());
            }
        }

        store.transaction(|tx| {
            let column = match &self.status {
                Some(status) => Some(require_column(tx, status)?),
                None => None,
            };
            let tasks = self
                .ids
                .iter()
                .map(|id| require_task(tx, id))
                .collect::<Result<Vec<_>>>()?;

            let now = Utc::now();
            for (index, task) in tasks.iter().enumerate() {
                match &column {
                    Some(column) => {
                        let grouping = grouping_after_move(column, task.grouping_id.as_ref());
                        tx.execute(
                            "UPDATE tasks SET position = ?2, status = ?3, grouping_id = ?4, updated_at = ?5
                             WHERE id = ?1",
                            params![task.id, index as i64, column.id, grouping, now],
                        )?;
                    }
                    None => {
                        tx.execute(
                            "UPDATE tasks SET position = ?2, updated_at = ?3 WHERE id = ?1",
                            params![task.id, index as i64, now],
                        )?;
                    }
                }
            }

            if let Some(column) = &column {
                let listed: HashSet<&TaskId> = self.ids.iter().collect();
                resequence(tx, &column.id, tasks.len() as i64, &listed)?;

                let mut sources: Vec<&ColumnId> = tasks
                    .iter()
                    .map(|task| &task.status)
                    .filter(|status| **status != column.id)
                    .collect();
                sources.sort();
                sources.dedup();
                for source in sources {
                    resequence(tx, source, 0, &HashSet::new())?;
                }
            }
            Ok(())
        })?;

        info!(count = self.ids.len(), status = ?self.status, "Reordered tasks");
        Ok(serde_json::json!({
            "ids": self.ids,
            "status": self.status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::AddColumn;
    use crate::error::BoardError;
    use crate::task::test_support::{add_task, layout};
    use crate::task::GetTask;

    #[test]
    fn test_reorder_tasks() {
        let store = BoardStore::open_in_memory().unwrap();
        let t1 = add_task(&store, "T1", "todo");
        let t2 = add_task(&store, "T2", "todo");
        let t3 = add_task(&store, "T3", "todo");

        ReorderTasks::new(vec![t3, t1, t2]).execute(&store).unwrap();

        let titles: Vec<String> = layout(&store).into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(titles, vec!["T3", "T1", "T2"]);
        assert_eq!(
            layout(&store).into_iter().map(|(_, _, p)| p).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_reorder_with_status_moves_bucket() {
        let store = BoardStore::open_in_memory().unwrap();
        AddColumn::new("QA").with_scope("p1").execute(&store).unwrap();
        let a = add_task(&store, "A", "todo");
        let b = add_task(&store, "B", "doing");

        ReorderTasks::new(vec![b.clone(), a.clone()])
            .in_status("qa")
            .execute(&store)
            .unwrap();

        let moved = GetTask::new(&a).execute(&store).unwrap();
        assert_eq!(moved["status"], "qa");
        assert_eq!(moved["position"], 1);
        assert_eq!(moved["grouping_id"], "p1");
        assert_eq!(GetTask::new(&b).execute(&store).unwrap()["position"], 0);
    }

    #[test]
    fn test_reorder_with_status_closes_source_bucket() {
        let store = BoardStore::open_in_memory().unwrap();
        let a = add_task(&store, "A", "todo");
        add_task(&store, "X", "todo");
        add_task(&store, "Y", "todo");

        ReorderTasks::new(vec![a]).in_status("doing").execute(&store).unwrap();
        assert_eq!(
            layout(&store),
            vec![
                ("A".to_string(), "doing".to_string(), 0),
                ("X".to_string(), "todo".to_string(), 0),
                ("Y".to_string(), "todo".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_reorder_with_status_keeps_unlisted_tasks_after_listed() {
        let store = BoardStore::open_in_memory().unwrap();
        add_task(&store, "D1", "doing");
        add_task(&store, "D2", "doing");
        let a = add_task(&store, "A", "todo");
        let b = add_task(&store, "B", "todo");

        ReorderTasks::new(vec![b, a]).in_status("doing").execute(&store).unwrap();
        assert_eq!(
            layout(&store),
            vec![
                ("B".to_string(), "doing".to_string(), 0),
                ("A".to_string(), "doing".to_string(), 1),
                ("D1".to_string(), "doing".to_string(), 2),
                ("D2".to_string(), "doing".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_reorder_validation_happens_before_writes() {
        let store = BoardStore::open_in_memory().unwrap();
        let t1 = add_task(&store, "T1", "todo");
        let t2 = add_task(&store, "T2", "todo");
        let before = layout(&store);

        let missing = ReorderTasks::new(vec![t2.clone(), TaskId::from("ghost"), t1.clone()])
            .execute(&store);
        assert!(matches!(missing, Err(BoardError::NotFound { .. })));

        let duplicate = ReorderTasks::new(vec![t2.clone(), t2]).execute(&store);
        assert!(matches!(
            duplicate,
            Err(BoardError::Validation(ValidationError::DuplicateId { .. }))
        ));

        let bad_status = ReorderTasks::new(vec![t1]).in_status("nope").execute(&store);
        assert!(matches!(bad_status, Err(BoardError::NotFound { .. })));

        assert_eq!(layout(&store), before);
    }
}
