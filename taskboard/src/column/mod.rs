//! Column commands and context-aware ordering

mod add;
mod delete;
mod get;
pub mod order;
mod reorder;
mod resolve;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use get::GetColumn;
pub use order::resolve_order;
pub use reorder::ReorderColumns;
pub use resolve::ResolveColumns;
pub use update::UpdateColumn;
