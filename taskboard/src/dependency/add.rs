//! AddDependency command

use super::graph::cycle_for;
use crate::error::{BoardError, Result, ValidationError};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::task::require_task;
use crate::types::{DependencyEdge, DependencyId, DependencyKind, TaskId};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Add a dependency edge `predecessor -> successor`.
///
/// Rejects self edges, duplicate pairs and any edge that would close a cycle.
/// The checks and the insert run in one transaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddDependency {
    pub predecessor: TaskId,
    pub successor: TaskId,
    #[serde(default)]
    pub kind: DependencyKind,
    /// Days between the two ends of the relation
    #[serde(default)]
    pub lag_days: i64,
}

operation!(
    AddDependency,
    verb = "add",
    noun = "dependency",
    description = "Make one task depend on another"
);

impl AddDependency {
    pub fn new(predecessor: impl Into<TaskId>, successor: impl Into<TaskId>) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
            kind: DependencyKind::default(),
            lag_days: 0,
        }
    }

    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_lag_days(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }
}

impl Execute for AddDependency {
    fn execute(&self, store: &BoardStore) -> Result<Value> {
        if self.predecessor == self.successor {
            return Err(ValidationError::SelfDependency {
                id: self.predecessor.to_string(),
            }
            .into());
        }

        let edge = store.transaction(|tx| {
            require_task(tx, &self.predecessor)?;
            require_task(tx, &self.successor)?;

            let existing: Option<DependencyId> = tx
                .query_row(
                    "SELECT id FROM dependencies WHERE predecessor_id = ?1 AND successor_id = ?2",
                    params![self.predecessor, self.successor],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Err(ValidationError::DuplicateDependency {
                    predecessor: self.predecessor.to_string(),
                    successor: self.successor.to_string(),
                }
                .into());
            }

            if let Some(path) = cycle_for(tx, &self.predecessor, &self.successor)? {
                warn!(%path, "Rejected dependency that would close a cycle");
                return Err(BoardError::CircularDependency { path });
            }

            let edge = DependencyEdge {
                id: DependencyId::new(),
                predecessor_id: self.predecessor.clone(),
                successor_id: self.successor.clone(),
                kind: self.kind,
                lag_days: self.lag_days,
                created_at: Utc::now(),
            };
            tx.execute(
                "INSERT INTO dependencies (id, predecessor_id, successor_id, kind, lag_days, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    edge.id,
                    edge.predecessor_id,
                    edge.successor_id,
                    edge.kind,
                    edge.lag_days,
                    edge.created_at
                ],
            )?;
            Ok(edge)
        })?;

        info!(
            edge = %edge.id,
            predecessor = %edge.predecessor_id,
            successor = %edge.successor_id,
            kind = %edge.kind,
            "Added dependency"
        );
        Ok(serde_json::to_value(&edge)?)
    }
}
