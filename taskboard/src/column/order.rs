//! Effective column order per viewing context
//!
//! A grouping context sees global columns plus its own scoped columns; the
//! aggregate context sees every column. The effective position is the
//! context's override when present, otherwise the column's base order.
//!
//! In the aggregate context a scoped column without an aggregate override is
//! placed in [`OrderTier::Unplaced`], so it sorts after every global or
//! explicitly positioned column no matter how large the board grows. Adding a
//! global column in the aggregate context first pins those columns with
//! aggregate overrides, so the new column still lands at the end.

use crate::error::{BoardError, Result};
use crate::types::{
    Column, ColumnId, GroupingId, OrderContext, OrderOverride, OrderTier, ResolvedColumn,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

/// Resolve `columns` for `context` given that context's override positions.
///
/// Pure: no I/O, deterministic for the same inputs.
pub fn resolve_order(
    columns: Vec<Column>,
    overrides: &HashMap<ColumnId, i64>,
    context: &OrderContext,
) -> Vec<ResolvedColumn> {
    let mut resolved: Vec<ResolvedColumn> = columns
        .into_iter()
        .filter(|c| c.is_visible_in(context))
        .map(|column| {
            let overridden = overrides.get(&column.id).copied();
            let tier = match (context, overridden, column.is_global()) {
                (OrderContext::All, None, false) => OrderTier::Unplaced,
                _ => OrderTier::Placed,
            };
            let essential = column.is_essential();
            ResolvedColumn {
                position: overridden.unwrap_or(column.base_order),
                tier,
                overridden: overridden.is_some(),
                essential,
                column,
            }
        })
        .collect();

    resolved.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    resolved
}

/// Load and resolve the columns visible in `context`
pub(crate) fn load_resolved(conn: &Connection, context: &OrderContext) -> Result<Vec<ResolvedColumn>> {
    let columns = load_columns(conn)?;
    let overrides = load_override_positions(conn, context)?;
    Ok(resolve_order(columns, &overrides, context))
}

/// Next free position at the end of `context`
pub(crate) fn next_position(conn: &Connection, context: &OrderContext) -> Result<i64> {
    Ok(load_resolved(conn, context)?
        .iter()
        .map(|c| c.position)
        .max()
        .map(|p| p + 1)
        .unwrap_or(0))
}

pub(crate) fn load_columns(conn: &Connection) -> Result<Vec<Column>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM columns", Column::FIELDS))?;
    let rows = stmt.query_map([], Column::from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn find_column(conn: &Connection, id: &ColumnId) -> Result<Option<Column>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM columns WHERE id = ?1", Column::FIELDS),
            params![id],
            Column::from_row,
        )
        .optional()?)
}

pub(crate) fn require_column(conn: &Connection, id: &ColumnId) -> Result<Column> {
    find_column(conn, id)?.ok_or_else(|| BoardError::not_found("column", id.as_str()))
}

/// Override positions for one context, keyed by column
pub(crate) fn load_override_positions(
    conn: &Connection,
    context: &OrderContext,
) -> Result<HashMap<ColumnId, i64>> {
    Ok(load_overrides(conn, context)?
        .into_iter()
        .map(|o| (o.column_id, o.position))
        .collect())
}

pub(crate) fn load_overrides(conn: &Connection, context: &OrderContext) -> Result<Vec<OrderOverride>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM column_order_overrides WHERE context_id IS ?1",
        OrderOverride::FIELDS
    ))?;
    let rows = stmt.query_map(params![context.as_grouping()], OrderOverride::from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Give every unplaced column in the aggregate context an override after the
/// placed ones, keeping their current relative order. Returns how many were placed.
pub(crate) fn place_unplaced(conn: &Connection, now: DateTime<Utc>) -> Result<usize> {
    let resolved = load_resolved(conn, &OrderContext::All)?;
    let mut next = resolved
        .iter()
        .filter(|c| c.tier == OrderTier::Placed)
        .map(|c| c.position)
        .max()
        .map_or(0, |p| p + 1);

    let mut placed = 0;
    for column in resolved.iter().filter(|c| c.tier == OrderTier::Unplaced) {
        upsert_override(conn, &OrderContext::All, column.id(), next, now)?;
        next += 1;
        placed += 1;
    }
    Ok(placed)
}

/// Insert or update the `(context, column)` override.
///
/// `IS` matches the NULL aggregate context, which `ON CONFLICT` cannot target.
pub(crate) fn upsert_override(
    conn: &Connection,
    context: &OrderContext,
    column_id: &ColumnId,
    position: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let grouping: Option<&GroupingId> = context.as_grouping();
    let updated = conn.execute(
        "UPDATE column_order_overrides SET position = ?3, updated_at = ?4
         WHERE context_id IS ?1 AND column_id = ?2",
        params![grouping, column_id, position, now],
    )?;
    if updated == 0 {
        conn.execute(
            "INSERT INTO column_order_overrides (context_id, column_id, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![grouping, column_id, position, now],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(id: &str, scope: Option<&str>, base_order: i64) -> Column {
        let now = Utc::now();
        Column {
            id: ColumnId::from_string(id),
            scope_id: scope.map(GroupingId::from_string),
            name: id.to_string(),
            color: None,
            base_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(resolved: &[ResolvedColumn]) -> Vec<&str> {
        resolved.iter().map(|c| c.id().as_str()).collect()
    }

    fn board() -> Vec<Column> {
        vec![
            column("todo", None, 0),
            column("doing", None, 1),
            column("done", None, 2),
            column("qa", Some("p1"), 3),
            column("design", Some("p2"), 4),
        ]
    }

    #[test]
    fn test_grouping_sees_global_and_own_scoped() {
        let resolved = resolve_order(board(), &HashMap::new(), &OrderContext::grouping("p1"));
        assert_eq!(ids(&resolved), vec!["todo", "doing", "done", "qa"]);
    }

    #[test]
    fn test_grouping_override_wins_over_base_order() {
        let overrides = HashMap::from([
            (ColumnId::from("qa"), 1),
            (ColumnId::from("doing"), 2),
            (ColumnId::from("done"), 3),
        ]);
        let resolved = resolve_order(board(), &overrides, &OrderContext::grouping("p1"));
        assert_eq!(ids(&resolved), vec!["todo", "qa", "doing", "done"]);
        assert!(resolved[1].overridden);
        assert!(!resolved[0].overridden);
    }

    #[test]
    fn test_ties_break_by_id() {
        let columns = vec![column("b", None, 1), column("a", None, 1), column("c", None, 0)];
        let resolved = resolve_order(columns, &HashMap::new(), &OrderContext::All);
        assert_eq!(ids(&resolved), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_aggregate_places_unplaced_scoped_last() {
        // A scoped column with a tiny base order still trails every global column.
        let mut columns = board();
        columns.push(column("early", Some("p3"), -5));
        let resolved = resolve_order(columns, &HashMap::new(), &OrderContext::All);
        assert_eq!(
            ids(&resolved),
            vec!["todo", "doing", "done", "early", "qa", "design"]
        );
        assert_eq!(resolved[3].tier, OrderTier::Unplaced);
    }

    #[test]
    fn test_aggregate_override_promotes_scoped_column() {
        let overrides = HashMap::from([(ColumnId::from("design"), 0)]);
        let resolved = resolve_order(board(), &overrides, &OrderContext::All);
        assert_eq!(
            ids(&resolved),
            vec!["design", "todo", "doing", "done", "qa"]
        );
        assert_eq!(resolved[0].tier, OrderTier::Placed);
    }

    #[test]
    fn test_large_base_orders_do_not_interleave() {
        let mut columns: Vec<Column> = (0..1500)
            .map(|i| column(&format!("g{:04}", i), None, i))
            .collect();
        columns.push(column("scoped", Some("p1"), 0));
        let resolved = resolve_order(columns, &HashMap::new(), &OrderContext::All);
        assert_eq!(resolved.last().unwrap().id().as_str(), "scoped");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let overrides = HashMap::from([(ColumnId::from("qa"), 0)]);
        let first = resolve_order(board(), &overrides, &OrderContext::grouping("p1"));
        let second = resolve_order(board(), &overrides, &OrderContext::grouping("p1"));
        assert_eq!(first, second);
    }
}
