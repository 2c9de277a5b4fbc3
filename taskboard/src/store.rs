//! BoardStore - transactional access to the board database
//!
//! The store provides statement execution and transactions. No business
//! logic lives here; operations do all the work.

use crate::config::BoardConfig;
use crate::error::Result;
use crate::schema;
use rusqlite::{Connection, OptionalExtension, Params, Row, Transaction, TransactionBehavior};
use std::time::Duration;
use tracing::{debug, warn};

/// Handle passed to every operation - provides access, not logic
pub struct BoardStore {
    conn: Connection,
    config: BoardConfig,
}

impl BoardStore {
    /// Open (or create) the database described by `config` and bootstrap the schema
    pub fn open(config: BoardConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open(&config.database_path)?
        };
        debug!("Opened board database at {}", config.database_path.display());

        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        let foreign_keys = if config.foreign_keys { "ON" } else { "OFF" };
        conn.execute_batch(&format!("PRAGMA foreign_keys = {};", foreign_keys))?;

        schema::ensure_schema(&conn, &config.default_columns)?;
        Ok(Self { conn, config })
    }

    /// Open a fresh in-memory board with default columns
    pub fn open_in_memory() -> Result<Self> {
        Self::open(BoardConfig::in_memory())
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Raw connection for read paths
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Execute a single statement, returning the number of changed rows
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Query at most one row
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.conn.query_row(sql, params, map).optional()?)
    }

    /// Query all matching rows
    pub fn query_many<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<T>>>()?)
    }

    /// Run `f` inside one IMMEDIATE transaction.
    ///
    /// Everything `f` writes through the transaction commits together. When
    /// `f` or the commit fails, the transaction is rolled back on drop and the
    /// error is returned unchanged.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(error) => {
                warn!(kind = error.kind(), "Rolling back transaction: {}", error);
                drop(tx);
                Err(error)
            }
        }
    }
}
