//! AddColumn command

use super::order::{find_column, load_resolved, next_position, place_unplaced, upsert_override};
use crate::error::{BoardError, Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{ColumnId, GroupingId, OrderContext};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Add a new column to the board.
///
/// A scoped column is anchored in its own grouping's context; a global column
/// is anchored in the context the caller was viewing, so it shows up at the
/// end of that view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column ID (slug); derived from the name when omitted
    pub id: Option<ColumnId>,
    /// The column display name
    pub name: String,
    /// Optional display color
    pub color: Option<String>,
    /// Owning grouping; `None` makes the column global
    pub scope_id: Option<GroupingId>,
    /// Context the caller was viewing
    #[serde(default = "aggregate")]
    pub anchor: OrderContext,
}

fn aggregate() -> OrderContext {
    OrderContext::All
}

operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Add a new column to the board"
);

impl AddColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
            scope_id: None,
            anchor: OrderContext::All,
        }
    }

    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Scope the column to one grouping
    pub fn with_scope(mut self, grouping: impl Into<GroupingId>) -> Self {
        self.scope_id = Some(grouping.into());
        self
    }

    /// Set the context the caller is viewing
    pub fn anchored_in(mut self, context: OrderContext) -> Self {
        self.anchor = context;
        self
    }

    fn anchor_context(&self) -> OrderContext {
        match &self.scope_id {
            Some(scope) => OrderContext::Grouping(scope.clone()),
            None => self.anchor.clone(),
        }
    }
}

impl Execute for AddColumn {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName { field: "name" }.into());
        }

        let anchor = self.anchor_context();
        let resolved = store.transaction(|tx| {
            let id = match &self.id {
                Some(id) => {
                    if find_column(tx, id)?.is_some() {
                        return Err(ValidationError::DuplicateColumn {
                            id: id.to_string(),
                        }
                        .into());
                    }
                    id.clone()
                }
                None => unique_id_for(tx, name)?,
            };

            let base_order: i64 = tx.query_row(
                "SELECT IFNULL(MAX(base_order), -1) + 1 FROM columns",
                [],
                |row| row.get(0),
            )?;
            let now = Utc::now();
            // Unplaced columns sort last in the aggregate view, so they are
            // pinned first to keep the new column at the end.
            if anchor == OrderContext::All {
                let placed = place_unplaced(tx, now)?;
                if placed > 0 {
                    debug!(placed, "Placed scoped columns in the aggregate context");
                }
            }
            let position = next_position(tx, &anchor)?;

            tx.execute(
                "INSERT INTO columns (id, scope_id, name, color, base_order, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![id, self.scope_id, name, self.color, base_order, now],
            )?;
            upsert_override(tx, &anchor, &id, position, now)?;

            info!(column = %id, anchor = %anchor, base_order, position, "Added column");

            load_resolved(tx, &anchor)?
                .into_iter()
                .find(|c| c.column.id == id)
                .ok_or_else(|| BoardError::not_found("column", id.as_str()))
        })?;

        Ok(serde_json::to_value(resolved)?)
    }
}

/// Slug of the name, suffixed until it is unused
fn unique_id_for(conn: &Connection, name: &str) -> Result<ColumnId> {
    let base = slugify(name);
    if base.is_empty() {
        return Ok(ColumnId::new());
    }
    let mut candidate = ColumnId::from_string(base.clone());
    let mut suffix = 2;
    while find_column(conn, &candidate)?.is_some() {
        candidate = ColumnId::from_string(format!("{}-{}", base, suffix));
        suffix += 1;
    }
    Ok(candidate)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ResolveColumns;

    fn column_ids(store: &BoardStore, context: OrderContext) -> Vec<String> {
        ResolveColumns::new(context).execute(store).unwrap()["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_add_column() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = AddColumn::new("Blocked").execute(&store).unwrap();

        assert_eq!(result["id"], "blocked");
        assert_eq!(result["name"], "Blocked");
        assert_eq!(result["base_order"], 3);
        assert_eq!(result["position"], 3);
        assert_eq!(result["overridden"], true);
    }

    #[test]
    fn test_add_column_empty_name() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = AddColumn::new("   ").execute(&store);
        assert!(matches!(
            result,
            Err(BoardError::Validation(ValidationError::EmptyName { field: "name" }))
        ));
    }

    #[test]
    fn test_add_column_duplicate() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = AddColumn::new("Duplicate").with_id("todo").execute(&store);
        assert!(matches!(
            result,
            Err(BoardError::Validation(ValidationError::DuplicateColumn { .. }))
        ));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let store = BoardStore::open_in_memory().unwrap();
        let first = AddColumn::new("Review").execute(&store).unwrap();
        let second = AddColumn::new("Review!").execute(&store).unwrap();
        assert_eq!(first["id"], "review");
        assert_eq!(second["id"], "review-2");
    }

    #[test]
    fn test_scoped_column_anchors_in_own_grouping() {
        let store = BoardStore::open_in_memory().unwrap();
        let result = AddColumn::new("QA")
            .with_scope("p1")
            .anchored_in(OrderContext::grouping("p2"))
            .execute(&store)
            .unwrap();
        assert_eq!(result["scope_id"], "p1");

        assert_eq!(
            column_ids(&store, OrderContext::grouping("p1")),
            vec!["todo", "doing", "done", "qa"]
        );
        assert_eq!(
            column_ids(&store, OrderContext::grouping("p2")),
            vec!["todo", "doing", "done"]
        );
        let overrides: i64 = store
            .query_one(
                "SELECT COUNT(*) FROM column_order_overrides WHERE context_id = 'p1'",
                [],
                |row| row.get(0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(overrides, 1);
    }

    #[test]
    fn test_global_column_lands_after_unplaced_scoped_columns() {
        let store = BoardStore::open_in_memory().unwrap();
        AddColumn::new("QA").with_scope("p1").execute(&store).unwrap();

        let result = AddColumn::new("Later").execute(&store).unwrap();
        assert_eq!(result["position"], 4);
        assert_eq!(
            column_ids(&store, OrderContext::All),
            vec!["todo", "doing", "done", "qa", "later"]
        );

        // Only the aggregate context was written; p1 keeps its own order
        assert_eq!(
            column_ids(&store, OrderContext::grouping("p1")),
            vec!["todo", "doing", "done", "qa", "later"]
        );
        let p1_overrides: i64 = store
            .query_one(
                "SELECT COUNT(*) FROM column_order_overrides WHERE context_id = 'p1'",
                [],
                |row| row.get(0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(p1_overrides, 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("In Progress"), "in-progress");
        assert_eq!(slugify("  QA / Review  "), "qa-review");
        assert_eq!(slugify("日本"), "");
    }
}
