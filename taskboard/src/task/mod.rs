//! Task commands
//!
//! Positions are dense per status bucket: every status keeps its own
//! `0..n` sequence. [`ReorderTasks`] without a status writes one sequence
//! across whatever ids it is given, for callers that need a board-wide order.

mod add;
mod delete;
mod get;
mod list;
mod mv;
mod reorder;

pub use add::AddTask;
pub use delete::DeleteTask;
pub use get::GetTask;
pub use list::ListTasks;
pub use mv::MoveTask;
pub use reorder::ReorderTasks;

use crate::error::{BoardError, Result};
use crate::types::{Column, ColumnId, GroupingId, Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

pub(crate) fn find_task(conn: &Connection, id: &TaskId) -> Result<Option<Task>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM tasks WHERE id = ?1", Task::FIELDS),
            params![id],
            Task::from_row,
        )
        .optional()?)
}

pub(crate) fn require_task(conn: &Connection, id: &TaskId) -> Result<Task> {
    find_task(conn, id)?.ok_or_else(|| BoardError::not_found("task", id.as_str()))
}

/// Number of tasks whose status is `status`
pub(crate) fn count_in_status(conn: &Connection, status: &ColumnId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE status = ?1",
        params![status],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as usize)
}

/// Position just past the end of the `status` bucket
pub(crate) fn next_task_position(conn: &Connection, status: &ColumnId) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT IFNULL(MAX(position), -1) + 1 FROM tasks WHERE status = ?1",
        params![status],
        |row| row.get(0),
    )?)
}

/// Renumber the `status` bucket densely from `start`, in current order,
/// leaving out the tasks in `skip`
pub(crate) fn resequence(
    conn: &Connection,
    status: &ColumnId,
    start: i64,
    skip: &HashSet<&TaskId>,
) -> Result<usize> {
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM tasks WHERE status = ?1 ORDER BY position, id",
    )?;
    let ids = stmt
        .query_map(params![status], |row| row.get::<_, TaskId>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut position = start;
    for id in ids.iter().filter(|id| !skip.contains(id)) {
        conn.execute(
            "UPDATE tasks SET position = ?2 WHERE id = ?1 AND position <> ?2",
            params![id, position],
        )?;
        position += 1;
    }
    Ok((position - start) as usize)
}

/// Grouping a task ends up in when it lands in `column`.
///
/// A scoped column re-files the task into the column's grouping; a global
/// column leaves the grouping as it was.
pub(crate) fn grouping_after_move(column: &Column, current: Option<&GroupingId>) -> Option<GroupingId> {
    match &column.scope_id {
        Some(scope) => Some(scope.clone()),
        None => current.cloned(),
    }
}
