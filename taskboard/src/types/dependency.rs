//! Dependency edge types

use super::ids::{DependencyId, TaskId};
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temporal relation between predecessor and successor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Successor starts after predecessor finishes
    #[default]
    FinishToStart,
    /// Successor starts after predecessor starts
    StartToStart,
    /// Successor finishes after predecessor finishes
    FinishToFinish,
    /// Successor finishes after predecessor starts
    StartToFinish,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FinishToStart => "finish_to_start",
            Self::StartToStart => "start_to_start",
            Self::FinishToFinish => "finish_to_finish",
            Self::StartToFinish => "start_to_finish",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finish_to_start" | "fs" => Ok(Self::FinishToStart),
            "start_to_start" | "ss" => Ok(Self::StartToStart),
            "finish_to_finish" | "ff" => Ok(Self::FinishToFinish),
            "start_to_finish" | "sf" => Ok(Self::StartToFinish),
            other => Err(format!("unknown dependency kind: {}", other)),
        }
    }
}

impl ToSql for DependencyKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for DependencyKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A directed edge `predecessor -> successor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub id: DependencyId,
    pub predecessor_id: TaskId,
    pub successor_id: TaskId,
    pub kind: DependencyKind,
    pub lag_days: i64,
    pub created_at: DateTime<Utc>,
}

impl DependencyEdge {
    pub(crate) const FIELDS: &'static str =
        "id, predecessor_id, successor_id, kind, lag_days, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            predecessor_id: row.get(1)?,
            successor_id: row.get(2)?,
            kind: row.get(3)?,
            lag_days: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}
