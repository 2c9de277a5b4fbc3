//! ResolveColumns command

use super::order::load_resolved;
use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{GroupingId, OrderContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Resolve the effective column order for a viewing context
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolveColumns {
    /// The context to resolve for
    pub context: OrderContext,
}

operation!(
    ResolveColumns,
    verb = "list",
    noun = "columns",
    description = "List columns in their effective order for a context",
    read_only
);

impl ResolveColumns {
    pub fn new(context: OrderContext) -> Self {
        Self { context }
    }

    /// Resolve the aggregate "all items" context
    pub fn all() -> Self {
        Self::new(OrderContext::All)
    }

    /// Resolve one grouping's context
    pub fn for_grouping(grouping: impl Into<GroupingId>) -> Self {
        Self::new(OrderContext::Grouping(grouping.into()))
    }
}

impl Execute for ResolveColumns {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let columns = load_resolved(store.connection(), &self.context)?;
        debug!(context = %self.context, count = columns.len(), "Resolved columns");
        Ok(serde_json::json!({
            "context": self.context,
            "columns": columns,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_ids(result: &Value) -> Vec<String> {
        result["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_resolve_default_board() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = ResolveColumns::all().execute(&store).unwrap();
        assert_eq!(column_ids(&result), vec!["todo", "doing", "done"]);
        assert_eq!(result["columns"][0]["essential"], true);
        assert_eq!(result["columns"][1]["essential"], false);
        assert_eq!(result["columns"][2]["position"], 2);
    }

    #[test]
    fn test_resolve_has_no_side_effects() {
        let store = BoardStore::open_in_memory().unwrap();
        let first = ResolveColumns::for_grouping("p1").execute(&store).unwrap();
        let second = ResolveColumns::for_grouping("p1").execute(&store).unwrap();
        assert_eq!(first, second);

        let overrides: i64 = store
            .query_one("SELECT COUNT(*) FROM column_order_overrides", [], |row| row.get(0))
            .unwrap()
            .unwrap();
        assert_eq!(overrides, 0);
    }
}
