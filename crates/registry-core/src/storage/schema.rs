//! SQLite schema for student records
//!
//! The `students` table is the only persisted state. `schema_info` records
//! the schema version so later migrations can detect older databases.

use rusqlite::{Connection, Result};
use tracing::debug;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// What to do with existing data when the engine opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Keep existing rows; create the table only if it is missing
    #[default]
    Preserve,
    /// Drop and recreate the table on every open (ephemeral mode)
    ResetOnStart,
}

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- AUTOINCREMENT keeps ids from being reused
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL
        );
        "#,
    )?;

    // Set schema version
    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Drop the students table and create it again
///
/// Runs in one transaction so an interrupted reset leaves the old table.
pub fn reset_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("DROP TABLE IF EXISTS students;")?;
    init_schema(&tx)?;
    tx.commit()
}

/// Bring the schema up according to the startup policy
///
/// `Preserve` always runs the idempotent DDL, so a missing `students`
/// table is recreated even when `schema_info` is current.
pub fn apply_policy(conn: &Connection, policy: SchemaPolicy) -> Result<()> {
    match policy {
        SchemaPolicy::ResetOnStart => reset_schema(conn),
        SchemaPolicy::Preserve => {
            if needs_init(conn) {
                debug!(version = SCHEMA_VERSION, "initializing schema");
            }
            init_schema(conn)
        }
    }
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_info WHERE key = 'version'")?;
    let result: Result<String> = stmt.query_row([], |row| row.get(0));

    match result {
        Ok(version_str) => Ok(version_str.parse().ok()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check if schema needs initialization or migration
pub fn needs_init(conn: &Connection) -> bool {
    // Check if schema_info table exists
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    match get_schema_version(conn) {
        Ok(Some(v)) => v < SCHEMA_VERSION,
        _ => true,
    }
}
