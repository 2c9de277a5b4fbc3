//! DeleteDependency command

use crate::error::{BoardError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::DependencyId;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a single dependency edge
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteDependency {
    /// The edge ID
    pub id: DependencyId,
}

operation!(
    DeleteDependency,
    verb = "delete",
    noun = "dependency",
    description = "Remove a dependency edge"
);

impl DeleteDependency {
    pub fn new(id: impl Into<DependencyId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for DeleteDependency {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let removed = store.execute("DELETE FROM dependencies WHERE id = ?1", params![self.id])?;
        if removed == 0 {
            return Err(BoardError::not_found("dependency", self.id.as_str()));
        }
        info!(edge = %self.id, "Deleted dependency");
        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::AddDependency;
    use crate::task::test_support::add_task;

    #[test]
    fn test_delete_dependency() {
        let store = BoardStore::open_in_memory().unwrap();
        let a = add_task(&store, "A", "todo");
        let b = add_task(&store, "B", "todo");
        let edge = AddDependency::new(&a, &b).execute(&store).unwrap();
        let id = edge["id"].as_str().unwrap();

        DeleteDependency::new(id).execute(&store).unwrap();
        let again = DeleteDependency::new(id).execute(&store);
        assert!(matches!(
            again,
            Err(BoardError::NotFound { resource: "dependency", .. })
        ));

        // The pair can be re-added once removed
        AddDependency::new(&a, &b).execute(&store).unwrap();
    }
}
