//! GetColumn command

use super::order::{load_resolved, require_column};
use crate::error::{BoardError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, OrderContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get one column as resolved in a context
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetColumn {
    /// The column ID
    pub id: ColumnId,
    /// The context whose position to report
    #[serde(default = "aggregate")]
    pub context: OrderContext,
}

fn aggregate() -> OrderContext {
    OrderContext::All
}

operation!(
    GetColumn,
    verb = "get",
    noun = "column",
    description = "Get a column and its effective position",
    read_only
);

impl GetColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            context: OrderContext::All,
        }
    }

    pub fn in_context(mut self, context: OrderContext) -> Self {
        self.context = context;
        self
    }
}

impl Execute for GetColumn {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let conn = store.connection();
        let column = require_column(conn, &self.id)?;
        if !column.is_visible_in(&self.context) {
            return Err(BoardError::not_found("column", self.id.as_str()));
        }
        let resolved = load_resolved(conn, &self.context)?
            .into_iter()
            .find(|c| c.column.id == self.id)
            .ok_or_else(|| BoardError::not_found("column", self.id.as_str()))?;
        Ok(serde_json::to_value(resolved)?)
    }
}
