//! Column types: Column, OrderContext, OrderOverride, ResolvedColumn

use super::ids::{ColumnId, GroupingId};
use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column defines a workflow stage.
///
/// Global columns (`scope_id == None`) are shared by every grouping; scoped
/// columns belong to exactly one grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<GroupingId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Assigned at creation; fallback position when no override exists
    pub base_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Column list used by every `SELECT` that feeds [`Column::from_row`]
    pub(crate) const FIELDS: &'static str =
        "id, scope_id, name, color, base_order, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            scope_id: row.get(1)?,
            name: row.get(2)?,
            color: row.get(3)?,
            base_order: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    /// Essential columns can never be deleted
    pub fn is_essential(&self) -> bool {
        crate::defaults::is_essential(&self.id)
    }

    pub fn is_global(&self) -> bool {
        self.scope_id.is_none()
    }

    /// Whether this column is part of the visible set of `context`
    pub fn is_visible_in(&self, context: &OrderContext) -> bool {
        match (context, &self.scope_id) {
            (OrderContext::All, _) => true,
            (OrderContext::Grouping(_), None) => true,
            (OrderContext::Grouping(g), Some(scope)) => g == scope,
        }
    }
}

/// The viewing frame an ordering is resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderContext {
    /// The aggregate "all items" view
    All,
    /// A single grouping's view
    Grouping(GroupingId),
}

impl OrderContext {
    pub fn grouping(id: impl Into<GroupingId>) -> Self {
        Self::Grouping(id.into())
    }

    /// Stored form: the aggregate context is NULL
    pub fn as_grouping(&self) -> Option<&GroupingId> {
        match self {
            Self::All => None,
            Self::Grouping(id) => Some(id),
        }
    }
}

impl From<Option<GroupingId>> for OrderContext {
    fn from(value: Option<GroupingId>) -> Self {
        match value {
            None => Self::All,
            Some(id) => Self::Grouping(id),
        }
    }
}

impl fmt::Display for OrderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Grouping(id) => write!(f, "grouping:{}", id),
        }
    }
}

/// A per-context position for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOverride {
    pub context: OrderContext,
    pub column_id: ColumnId,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderOverride {
    pub(crate) const FIELDS: &'static str =
        "context_id, column_id, position, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let context: Option<GroupingId> = row.get(0)?;
        Ok(Self {
            context: context.into(),
            column_id: row.get(1)?,
            position: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

/// Primary sort tier in the aggregate context.
///
/// Scoped columns that were never positioned in the aggregate view sort after
/// every placed column, whatever their base order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTier {
    Placed,
    Unplaced,
}

/// A column together with its effective position in one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    #[serde(flatten)]
    pub column: Column,
    /// Effective position: the context override, or the base order
    pub position: i64,
    pub tier: OrderTier,
    /// True when `position` came from an override row
    pub overridden: bool,
    pub essential: bool,
}

impl ResolvedColumn {
    pub fn id(&self) -> &ColumnId {
        &self.column.id
    }

    /// Full sort key; ties on position fall back to the id
    pub fn sort_key(&self) -> (OrderTier, i64, &str) {
        (self.tier, self.position, self.column.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(id: &str, scope: Option<&str>) -> Column {
        let now = Utc::now();
        Column {
            id: ColumnId::from_string(id),
            scope_id: scope.map(GroupingId::from_string),
            name: id.to_string(),
            color: None,
            base_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_visibility() {
        let global = column("todo", None);
        let scoped = column("qa", Some("p1"));

        assert!(global.is_visible_in(&OrderContext::All));
        assert!(global.is_visible_in(&OrderContext::grouping("p2")));
        assert!(scoped.is_visible_in(&OrderContext::All));
        assert!(scoped.is_visible_in(&OrderContext::grouping("p1")));
        assert!(!scoped.is_visible_in(&OrderContext::grouping("p2")));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(OrderTier::Placed < OrderTier::Unplaced);
    }

    #[test]
    fn test_context_serialization() {
        assert_eq!(serde_json::to_value(OrderContext::All).unwrap(), "all");
        assert_eq!(
            serde_json::to_value(OrderContext::grouping("p1")).unwrap(),
            serde_json::json!({"grouping": "p1"})
        );
    }
}
