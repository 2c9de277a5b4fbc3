//! Error types for the taskboard engine

use thiserror::Error;

/// Result type for taskboard operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Input that was rejected before anything was written
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A task was asked to depend on itself
    #[error("task '{id}' cannot depend on itself")]
    SelfDependency { id: String },

    /// The ordered pair already has an edge
    #[error("dependency {predecessor} -> {successor} already exists")]
    DuplicateDependency {
        predecessor: String,
        successor: String,
    },

    /// A required name or title was empty
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    /// A column with this id already exists
    #[error("column already exists: {id}")]
    DuplicateColumn { id: String },

    /// The same id appeared twice in an ordering
    #[error("duplicate id in ordering: {id}")]
    DuplicateId { id: String },

    /// A column was positioned in a context that cannot see it
    #[error("column '{id}' is not visible in context {context}")]
    ColumnNotVisible { id: String, context: String },

    /// Migration target equals the column being deleted
    #[error("column '{id}' cannot be migrated into itself")]
    MigrationTargetIsSource { id: String },
}

/// Errors that can occur in taskboard operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Rejected input
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The new edge would close a cycle
    #[error("circular dependency: {path}")]
    CircularDependency { path: String },

    /// Essential columns are never deleted
    #[error("column '{id}' is essential and cannot be deleted")]
    ProtectedEntity { id: String },

    /// Column is still referenced by tasks and no migration target was given
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    HasDependents { id: String, count: usize },

    /// Referenced column, task, dependency or migration target does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// SQLite error
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoardError {
    /// Create a not-found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Stable short name of the error kind, for callers mapping errors to messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::CircularDependency { .. } => "circular_dependency",
            Self::ProtectedEntity { .. } => "protected_entity",
            Self::HasDependents { .. } => "has_dependents",
            Self::NotFound { .. } => "not_found",
            Self::Sql(_) => "storage",
            Self::Json(_) => "serialization",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}
