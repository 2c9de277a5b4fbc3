//! BoardOperationProcessor - runs operations and records activity
//!
//! Mutating operations are recorded in the activity table whether they
//! succeed or fail; read-only operations are never recorded.

use crate::activity;
use crate::error::Result;
use crate::operation::Execute;
use crate::store::BoardStore;
use crate::types::LogEntry;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// Executes operations on behalf of an actor
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute recorded activity to `actor` ("user" or "agent[session]")
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Execute `op` and, when it mutates, record it
    pub fn process<O>(&self, op: &O, store: &BoardStore) -> Result<Value>
    where
        O: Execute + Serialize,
    {
        let start = Instant::now();
        let result = op.execute(store);
        let duration_ms = start.elapsed().as_millis() as u64;

        if !op.is_mutating() {
            return result;
        }

        let op_string = op.op_string();
        match &result {
            Ok(_) => info!(op = %op_string, actor = ?self.actor, duration_ms, "Operation succeeded"),
            Err(error) => warn!(
                op = %op_string,
                actor = ?self.actor,
                kind = error.kind(),
                "Operation failed: {}",
                error
            ),
        }

        if store.config().activity_log {
            let output = match &result {
                Ok(value) => value.clone(),
                Err(error) => serde_json::json!({
                    "error": error.to_string(),
                    "kind": error.kind(),
                }),
            };
            let input = serde_json::to_value(op).unwrap_or_else(|error| {
                warn!(op = %op_string, "Failed to serialize operation input: {}", error);
                Value::Null
            });
            let entry = LogEntry::new(
                op_string,
                input,
                output,
                self.actor.clone(),
                duration_ms,
            );
            if let Err(error) = activity::record(store.connection(), &entry) {
                warn!(op = %entry.op, "Failed to record activity: {}", error);
            }
        }

        result
    }
}
