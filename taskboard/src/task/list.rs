//! ListTasks command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, GroupingId, Task};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List tasks ordered by status then position
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListTasks {
    /// Only tasks in this column
    pub status: Option<ColumnId>,
    /// Only tasks filed under this grouping
    pub grouping_id: Option<GroupingId>,
}

operation!(
    ListTasks,
    verb = "list",
    noun = "tasks",
    description = "List tasks, optionally filtered by status or grouping",
    read_only
);

impl ListTasks {
    pub fn new() -> Self {
        Self::default()
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

impl Execute for ListTasks {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let tasks = store.query_many(
            &format!(
                "SELECT {} FROM tasks
                 WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR grouping_id = ?2)
                 ORDER BY status, position, id",
                Task::FIELDS
            ),
            params![self.status, self.grouping_id],
            Task::from_row,
        )?;
        Ok(serde_json::json!({
            "tasks": tasks,
            "count": tasks.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::test_support::add_task;

    #[test]
    fn test_list_tasks_filters() {
        let store = BoardStore::open_in_memory().unwrap();
        add_task(&store, "A", "todo");
        add_task(&store, "B", "doing");
        add_task(&store, "C", "todo");

        let all = ListTasks::new().execute(&store).unwrap();
        assert_eq!(all["count"], 3);

        let todo = ListTasks::new().with_status("todo").execute(&store).unwrap();
        let titles: Vec<&str> = todo["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);

        let grouped = ListTasks::new().with_grouping("p1").execute(&store).unwrap();
        assert_eq!(grouped["count"], 0);
    }
}
