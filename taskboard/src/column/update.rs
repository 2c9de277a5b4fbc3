//! UpdateColumn command

use super::order::{find_column, require_column};
use crate::error::{BoardError, Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::ColumnId;
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Update a column's name, color or base order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// New column name
    pub name: Option<String>,
    /// New color
    pub color: Option<String>,
    /// New base order
    pub base_order: Option<i64>,
}

operation!(
    UpdateColumn,
    verb = "update",
    noun = "column",
    description = "Update a column's name, color or base order"
);

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
            base_order: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_base_order(mut self, base_order: i64) -> Self {
        self.base_order = Some(base_order);
        self
    }
}

impl Execute for UpdateColumn {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let name = match &self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(ValidationError::EmptyName { field: "name" }.into());
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let column = store.transaction(|tx| {
            let mut column = require_column(tx, &self.id)?;
            if let Some(name) = &name {
                column.name = name.clone();
            }
            if let Some(color) = &self.color {
                column.color = Some(color.clone());
            }
            if let Some(base_order) = self.base_order {
                column.base_order = base_order;
            }
            column.updated_at = Utc::now();

            tx.execute(
                "UPDATE columns SET name = ?2, color = ?3, base_order = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    column.id,
                    column.name,
                    column.color,
                    column.base_order,
                    column.updated_at
                ],
            )?;
            debug!(column = %column.id, "Updated column");

            find_column(tx, &self.id)?.ok_or_else(|| BoardError::not_found("column", self.id.as_str()))
        })?;

        Ok(serde_json::to_value(column)?)
    }
}
