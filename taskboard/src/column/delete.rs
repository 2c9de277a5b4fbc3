//! DeleteColumn command

use super::order::require_column;
use crate::error::{BoardError, Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::task::{count_in_status, next_task_position};
use crate::types::ColumnId;
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a column.
///
/// Fails while tasks still sit in the column, unless a migration target is
/// given; the tasks then move to the target and the column is deleted in the
/// same transaction. Essential columns are never deleted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
    /// Column that receives the deleted column's tasks
    pub target: Option<ColumnId>,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete a column, optionally migrating its tasks"
);

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            target: None,
        }
    }

    /// Delete `id` after moving its tasks into `target`
    pub fn with_migration(id: impl Into<ColumnId>, target: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            target: Some(target.into()),
        }
    }
}

impl Execute for DeleteColumn {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        if crate::defaults::is_essential(&self.id) {
            return Err(BoardError::ProtectedEntity {
                id: self.id.to_string(),
            });
        }

        let migrated = store.transaction(|tx| {
            require_column(tx, &self.id)?;
            if self.target.as_ref() == Some(&self.id) {
                return Err(ValidationError::MigrationTargetIsSource {
                    id: self.id.to_string(),
                }
                .into());
            }
            let count = count_in_status(tx, &self.id)?;

            let migrated = match &self.target {
                Some(target) => {
                    let target = require_column(tx, target)?;
                    // Appended after the target's existing tasks, keeping their relative order.
                    // A scoped target re-files the tasks into its grouping.
                    let offset = next_task_position(tx, &target.id)?;
                    tx.execute(
                        "UPDATE tasks SET status = ?2, position = position + ?3, updated_at = ?4,
                             grouping_id = IFNULL(?5, grouping_id)
                         WHERE status = ?1",
                        params![self.id, target.id, offset, Utc::now(), target.scope_id],
                    )?
                }
                None if count > 0 => {
                    return Err(BoardError::HasDependents {
                        id: self.id.to_string(),
                        count,
                    });
                }
                None => 0,
            };

            tx.execute(
                "DELETE FROM column_order_overrides WHERE column_id = ?1",
                params![self.id],
            )?;
            tx.execute("DELETE FROM columns WHERE id = ?1", params![self.id])?;
            Ok(migrated)
        })?;

        info!(column = %self.id, target = ?self.target, migrated, "Deleted column");
        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
            "target": self.target,
            "migrated": migrated,
        }))
    }
}
