//! ReorderColumns command

use super::order::{require_column, upsert_override};
use crate::error::{Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, OrderContext};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

/// Position columns within one context.
///
/// Each id's override in `context` is set to its index. Overrides of every
/// other context are left untouched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderColumns {
    /// Column ids in their new order
    pub ids: Vec<ColumnId>,
    /// The context being reordered
    pub context: OrderContext,
}

operation!(
    ReorderColumns,
    verb = "reorder",
    noun = "columns",
    description = "Set the column order of one context"
);

impl ReorderColumns {
    pub fn new(ids: Vec<ColumnId>, context: OrderContext) -> Self {
        Self { ids, context }
    }
}

impl Execute for ReorderColumns {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let mut seen = HashSet::with_capacity(self.ids.len());
        for id in &self.ids {
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateId { id: id.to_string() }.into());
            }
        }

        store.transaction(|tx| {
            for id in &self.ids {
                let column = require_column(tx, id)?;
                if !column.is_visible_in(&self.context) {
                    return Err(ValidationError::ColumnNotVisible {
                        id: id.to_string(),
                        context: self.context.to_string(),
                    }
                    .into());
                }
            }

            let now = Utc::now();
            for (index, id) in self.ids.iter().enumerate() {
                upsert_override(tx, &self.context, id, index as i64, now)?;
            }
            Ok(())
        })?;

        info!(context = %self.context, count = self.ids.len(), "Reordered columns");
        Ok(serde_json::json!({
            "context": self.context,
            "ids": self.ids,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{AddColumn, ResolveColumns};
    use crate::error::BoardError;

    fn column_ids(store: &BoardStore, context: OrderContext) -> Vec<String> {
        ResolveColumns::new(context).execute(store).unwrap()["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }

    fn ids(list: &[&str]) -> Vec<ColumnId> {
        list.iter().map(|s| ColumnId::from(*s)).collect()
    }

    #[test]
    fn test_reorder_columns() {
        let store = BoardStore::open_in_memory().unwrap();
        ReorderColumns::new(ids(&["done", "todo", "doing"]), OrderContext::All)
            .execute(&store)
            .unwrap();
        assert_eq!(column_ids(&store, OrderContext::All), vec!["done", "todo", "doing"]);
    }

    #[test]
    fn test_reorder_is_isolated_per_context() {
        let store = BoardStore::open_in_memory().unwrap();
        ReorderColumns::new(ids(&["doing", "todo", "done"]), OrderContext::grouping("p1"))
            .execute(&store)
            .unwrap();

        assert_eq!(
            column_ids(&store, OrderContext::grouping("p1")),
            vec!["doing", "todo", "done"]
        );
        assert_eq!(
            column_ids(&store, OrderContext::grouping("p2")),
            vec!["todo", "doing", "done"]
        );
        assert_eq!(column_ids(&store, OrderContext::All), vec!["todo", "doing", "done"]);
    }

    #[test]
    fn test_partial_reorder_upserts() {
        let store = BoardStore::open_in_memory().unwrap();
        let context = OrderContext::grouping("p1");
        ReorderColumns::new(ids(&["done", "todo"]), context.clone())
            .execute(&store)
            .unwrap();
        ReorderColumns::new(ids(&["todo", "done"]), context.clone())
            .execute(&store)
            .unwrap();

        let rows: i64 = store
            .query_one(
                "SELECT COUNT(*) FROM column_order_overrides WHERE context_id = 'p1'",
                [],
                |row| row.get(0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(rows, 2);
        // doing keeps base order 1, tying with done at 1; the id breaks the tie.
        assert_eq!(column_ids(&store, context), vec!["todo", "doing", "done"]);
    }

    #[test]
    fn test_reorder_rejects_invisible_column() {
        let store = BoardStore::open_in_memory().unwrap();
        AddColumn::new("QA").with_scope("p1").execute(&store).unwrap();

        let result = ReorderColumns::new(ids(&["qa", "todo"]), OrderContext::grouping("p2"))
            .execute(&store);
        assert!(matches!(
            result,
            Err(BoardError::Validation(ValidationError::ColumnNotVisible { .. }))
        ));
        let p2_rows: i64 = store
            .query_one(
                "SELECT COUNT(*) FROM column_order_overrides WHERE context_id = 'p2'",
                [],
                |row| row.get(0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(p2_rows, 0);
    }

    #[test]
    fn test_reorder_rejects_duplicates_and_missing() {
        let store = BoardStore::open_in_memory().unwrap();
        let dup = ReorderColumns::new(ids(&["todo", "todo"]), OrderContext::All).execute(&store);
        assert!(matches!(
            dup,
            Err(BoardError::Validation(ValidationError::DuplicateId { .. }))
        ));

        let missing =
            ReorderColumns::new(ids(&["todo", "ghost"]), OrderContext::All).execute(&store);
        assert!(matches!(missing, Err(BoardError::NotFound { .. })));
    }
}
