//! Reachability over dependency edges
//!
//! Inserting `predecessor -> successor` closes a cycle exactly when
//! `predecessor` is already reachable from `successor`. The check is a
//! breadth-first walk along outgoing edges, O(V + E) per insertion.

use crate::error::Result;
use crate::types::TaskId;
use rusqlite::{params, Connection};
use std::collections::{HashMap, VecDeque};

/// Breadth-first search from `start` to `goal` over `successors`.
///
/// Returns the path `start, .., goal` when `goal` is reachable.
pub fn find_path<F>(start: &TaskId, goal: &TaskId, mut successors: F) -> Result<Option<Vec<TaskId>>>
where
    F: FnMut(&TaskId) -> Result<Vec<TaskId>>,
{
    let mut parents: HashMap<TaskId, Option<TaskId>> = HashMap::new();
    let mut queue: VecDeque<TaskId> = VecDeque::new();
    parents.insert(start.clone(), None);
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        if &current == goal {
            let mut path = vec![current.clone()];
            let mut cursor = parents.get(&current).cloned().flatten();
            while let Some(node) = cursor {
                cursor = parents.get(&node).cloned().flatten();
                path.push(node);
            }
            path.reverse();
            return Ok(Some(path));
        }

        for next in successors(&current)? {
            if !parents.contains_key(&next) {
                parents.insert(next.clone(), Some(current.clone()));
                queue.push_back(next);
            }
        }
    }

    Ok(None)
}

/// Direct successors of `task` in the stored graph
pub(crate) fn successors_of(conn: &Connection, task: &TaskId) -> Result<Vec<TaskId>> {
    let mut stmt = conn
        .prepare_cached("SELECT successor_id FROM dependencies WHERE predecessor_id = ?1")?;
    let rows = stmt.query_map(params![task], |row| row.get(0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<TaskId>>>()?)
}

/// The cycle `predecessor -> successor` would close, rendered for diagnostics
pub(crate) fn cycle_for(
    conn: &Connection,
    predecessor: &TaskId,
    successor: &TaskId,
) -> Result<Option<String>> {
    let path = find_path(successor, predecessor, |task| successors_of(conn, task))?;
    Ok(path.map(|path| {
        std::iter::once(predecessor)
            .chain(path.iter())
            .map(TaskId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }))
}
