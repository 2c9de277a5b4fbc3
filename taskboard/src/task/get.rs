//! GetTask command

use super::require_task;
use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a task by ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTask {
    /// The task ID
    pub id: TaskId,
}

operation!(
    GetTask,
    verb = "get",
    noun = "task",
    description = "Get a task by ID",
    read_only
);

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for GetTask {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let task = require_task(store.connection(), &self.id)?;
        Ok(serde_json::to_value(task)?)
    }
}
