//! Core types for the taskboard engine

mod column;
mod dependency;
mod ids;
mod log;
mod task;

pub use column::{Column, OrderContext, OrderOverride, OrderTier, ResolvedColumn};
pub use dependency::{DependencyEdge, DependencyKind};
pub use ids::{ColumnId, DependencyId, GroupingId, LogEntryId, TaskId};
pub use log::LogEntry;
pub use task::Task;
