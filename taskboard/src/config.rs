//! Board configuration loaded with figment
//!
//! Sources in precedence order (later sources override earlier ones):
//! 1. Built-in defaults
//! 2. `taskboard.toml`, `taskboard.yaml`, `taskboard.json` in the config directory
//! 3. `TASKBOARD_` environment variables (e.g. `TASKBOARD_DATABASE_PATH`)

use crate::defaults::{default_columns, DefaultColumn};
use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Special database path that opens an in-memory store
pub const IN_MEMORY: &str = ":memory:";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// SQLite database file, or `:memory:`
    pub database_path: PathBuf,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout_ms: u64,
    /// Enforce foreign keys (`PRAGMA foreign_keys`)
    pub foreign_keys: bool,
    /// Record mutating operations in the activity table
    pub activity_log: bool,
    /// Columns seeded into an empty board
    pub default_columns: Vec<DefaultColumn>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(".taskboard").join("board.db"),
            busy_timeout_ms: 5000,
            foreign_keys: true,
            activity_log: true,
            default_columns: default_columns(),
        }
    }
}

impl BoardConfig {
    /// Configuration for a throwaway in-memory board
    pub fn in_memory() -> Self {
        Self {
            database_path: PathBuf::from(IN_MEMORY),
            ..Self::default()
        }
    }

    /// Load configuration using the current directory as the config directory
    pub fn load() -> Result<Self> {
        let dir = std::env::current_dir()?;
        Self::load_from(&dir)
    }

    /// Load configuration from files in `dir` plus environment overrides
    pub fn load_from(dir: &Path) -> Result<Self> {
        debug!("Loading board configuration from {}", dir.display());
        let config: Self = Self::figment(dir).extract()?;
        trace!(?config, "Board configuration loaded");
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("taskboard.toml")))
            .merge(Yaml::file(dir.join("taskboard.yaml")))
            .merge(Json::file(dir.join("taskboard.json")))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}
