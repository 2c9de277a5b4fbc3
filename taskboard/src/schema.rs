//! Bootstrap schema
//!
//! Tables are created idempotently on open. The aggregate ordering context is
//! stored as a NULL `context_id`; the unique index folds NULL to `''` because
//! SQLite treats NULLs as distinct in plain unique constraints.

use crate::defaults::{seed_columns, DefaultColumn, ESSENTIAL_COLUMNS};
use crate::error::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS columns (
    id          TEXT PRIMARY KEY NOT NULL,
    scope_id    TEXT,
    name        TEXT NOT NULL,
    color       TEXT,
    base_order  INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS column_order_overrides (
    context_id  TEXT,
    column_id   TEXT NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_column_order_context_column
    ON column_order_overrides (IFNULL(context_id, ''), column_id);

CREATE TABLE IF NOT EXISTS tasks (
    id           TEXT PRIMARY KEY NOT NULL,
    title        TEXT NOT NULL,
    grouping_id  TEXT,
    status       TEXT NOT NULL REFERENCES columns(id),
    position     INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_status_position ON tasks (status, position);

CREATE TABLE IF NOT EXISTS dependencies (
    id              TEXT PRIMARY KEY NOT NULL,
    predecessor_id  TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
    successor_id    TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
    kind            TEXT NOT NULL,
    lag_days        INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    UNIQUE (predecessor_id, successor_id),
    CHECK (predecessor_id <> successor_id)
);

CREATE INDEX IF NOT EXISTS idx_dependencies_successor ON dependencies (successor_id);

CREATE TABLE IF NOT EXISTS activity (
    id           TEXT PRIMARY KEY NOT NULL,
    timestamp    TEXT NOT NULL,
    op           TEXT NOT NULL,
    input        TEXT NOT NULL,
    output       TEXT NOT NULL,
    actor        TEXT,
    duration_ms  INTEGER NOT NULL
);
"#;

/// Create all tables and indexes, then seed columns.
///
/// An empty board receives the configured default columns; an existing board
/// only gets any missing essential column back.
pub fn ensure_schema(conn: &Connection, defaults: &[DefaultColumn]) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let column_count: i64 = conn.query_row("SELECT COUNT(*) FROM columns", [], |row| row.get(0))?;
    let now = Utc::now();

    if column_count == 0 {
        let seeds = seed_columns(defaults);
        info!("Seeding {} default columns", seeds.len());
        for (order, seed) in seeds.iter().enumerate() {
            conn.execute(
                "INSERT INTO columns (id, scope_id, name, color, base_order, created_at, updated_at)
                 VALUES (?1, NULL, ?2, ?3, ?4, ?5, ?5)",
                params![seed.id, seed.name, seed.color, order as i64, now],
            )?;
        }
        return Ok(());
    }

    for id in ESSENTIAL_COLUMNS {
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO columns (id, scope_id, name, color, base_order, created_at, updated_at)
             SELECT ?1, NULL, ?2, NULL, IFNULL(MAX(base_order), -1) + 1, ?3, ?3 FROM columns",
            params![id, essential_name(id), now],
        )?;
        if inserted > 0 {
            debug!("Restored missing essential column '{}'", id);
        }
    }
    Ok(())
}

fn essential_name(id: &str) -> &'static str {
    if id == crate::defaults::TODO {
        "To Do"
    } else {
        "Done"
    }
}
