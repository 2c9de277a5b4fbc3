//! Built-in columns
//!
//! `todo` and `done` are essential: every board has them, they are always
//! global, and they can never be deleted. Other default columns come from
//! configuration and are only seeded into an empty board.

use crate::types::ColumnId;
use serde::{Deserialize, Serialize};

/// Id of the entry column
pub const TODO: &str = "todo";

/// Id of the terminal column
pub const DONE: &str = "done";

/// Ids of columns that can never be deleted
pub const ESSENTIAL_COLUMNS: [&str; 2] = [TODO, DONE];

/// Whether the column id names an essential column
pub fn is_essential(id: &ColumnId) -> bool {
    ESSENTIAL_COLUMNS.contains(&id.as_str())
}

/// A column seeded into a fresh board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultColumn {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DefaultColumn {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }
}

/// The stock To Do / Doing / Done layout
pub fn default_columns() -> Vec<DefaultColumn> {
    vec![
        DefaultColumn::new(TODO, "To Do"),
        DefaultColumn::new("doing", "Doing"),
        DefaultColumn::new(DONE, "Done"),
    ]
}

/// Seed list with the essentials guaranteed: `todo` first and `done` last
/// unless the configured list already places them.
pub fn seed_columns(configured: &[DefaultColumn]) -> Vec<DefaultColumn> {
    let mut seeds: Vec<DefaultColumn> = Vec::with_capacity(configured.len() + 2);
    for column in configured {
        if !seeds.iter().any(|c| c.id == column.id) {
            seeds.push(column.clone());
        }
    }
    if !seeds.iter().any(|c| c.id == TODO) {
        seeds.insert(0, DefaultColumn::new(TODO, "To Do"));
    }
    if !seeds.iter().any(|c| c.id == DONE) {
        seeds.push(DefaultColumn::new(DONE, "Done"));
    }
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_ids() {
        assert!(is_essential(&ColumnId::from_string("todo")));
        assert!(is_essential(&ColumnId::from_string("done")));
        assert!(!is_essential(&ColumnId::from_string("doing")));
    }

    #[test]
    fn test_seed_columns_adds_missing_essentials() {
        let seeds = seed_columns(&[DefaultColumn::new("backlog", "Backlog")]);
        let ids: Vec<&str> = seeds.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "backlog", "done"]);
    }

    #[test]
    fn test_seed_columns_keeps_configured_placement() {
        let seeds = seed_columns(&[
            DefaultColumn::new("done", "Shipped"),
            DefaultColumn::new("todo", "Inbox"),
            DefaultColumn::new("todo", "Duplicate"),
        ]);
        let ids: Vec<&str> = seeds.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["done", "todo"]);
        assert_eq!(seeds[1].name, "Inbox");
    }

    #[test]
    fn test_default_layout() {
        let ids: Vec<String> = default_columns().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["todo", "doing", "done"]);
    }
}
