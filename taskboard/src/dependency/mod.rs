//! Dependency commands
//!
//! The edge set is kept acyclic at all times: every insertion is checked
//! against the existing graph inside the same transaction as the insert.

mod add;
mod clear;
mod delete;
pub mod graph;
mod list;

pub use add::AddDependency;
pub use clear::ClearTaskDependencies;
pub use delete::DeleteDependency;
pub use list::ListDependencies;

pub(crate) use clear::clear_edges;
