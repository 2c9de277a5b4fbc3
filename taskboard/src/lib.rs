//! Ordering and dependency engine for a SQLite-backed task board
//!
//! This crate keeps the invariants of a multi-view task board in one place:
//!
//! - **Context-aware column order** - columns are global or scoped to one
//!   grouping, and every grouping (plus the aggregate "all" view) has its own
//!   ordering that never leaks into another context
//! - **Acyclic dependencies** - task-to-task edges always form a DAG
//! - **Atomic mutations** - moves, reorders and column migrations commit as a
//!   whole or not at all
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{BoardStore, Execute, OrderContext};
//! use taskboard::column::{AddColumn, ResolveColumns};
//! use taskboard::task::{AddTask, MoveTask};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = BoardStore::open_in_memory()?;
//!
//! // A column only project "p1" sees
//! AddColumn::new("QA").with_scope("p1").execute(&store)?;
//!
//! // Dropping a task into it files the task under "p1"
//! let task = AddTask::new("Ship it").execute(&store)?;
//! let id = task["id"].as_str().ok_or("task without id")?;
//! MoveTask::new(id, "qa").execute(&store)?;
//!
//! let columns = ResolveColumns::new(OrderContext::grouping("p1")).execute(&store)?;
//! println!("{}", columns);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage
//!
//! ```text
//! columns                 id, scope_id, name, color, base_order
//! column_order_overrides  (context_id, column_id) -> position; NULL context = "all"
//! tasks                   id, title, grouping_id, status, position
//! dependencies            (predecessor_id, successor_id), kind, lag_days
//! activity                one row per mutating operation
//! ```

pub mod activity;
pub mod column;
pub mod config;
pub mod defaults;
pub mod dependency;
mod error;
mod operation;
mod processor;
pub mod schema;
mod store;
pub mod task;
pub mod types;

pub use config::BoardConfig;
pub use error::{BoardError, Result, ValidationError};
pub use operation::{Execute, Operation};
pub use processor::BoardOperationProcessor;
pub use store::BoardStore;

// Re-export commonly used types
pub use types::{
    Column, ColumnId, DependencyEdge, DependencyId, DependencyKind, GroupingId, LogEntry,
    OrderContext, OrderOverride, OrderTier, ResolvedColumn, Task, TaskId,
};
