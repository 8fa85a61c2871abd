//! Storage layer
//!
//! Handlers depend on the [`StudentStore`] capability rather than a concrete
//! engine.
//!
//! ## Engines
//!
//! - **SQLite** ([`SqliteStore`]): persistent table, the production engine
//! - **Memory** ([`MemoryStore`]): process-local map, for tests and
//!   ephemeral servers

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{NewStudent, Student};

pub use error::{ErrorKind, StorageError, StorageResult};
pub use memory::MemoryStore;
pub use schema::{init_schema, needs_init, SchemaPolicy, SCHEMA_VERSION};
pub use sqlite::SqliteStore;

/// Create, point lookup and full listing of student records
///
/// Implementations must be safe to share across tokio tasks.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Persist a new record and return its assigned id
    ///
    /// Fails with [`StorageError::Conflict`] when the email is taken. Existing
    /// records are left untouched on failure.
    async fn create_student(&self, student: &NewStudent) -> StorageResult<i64>;

    /// Fetch one record
    ///
    /// Fails with [`StorageError::NotFound`] when no record has `id`.
    async fn get_student(&self, id: i64) -> StorageResult<Student>;

    /// Fetch every record, ordered by id
    ///
    /// Returns an empty vector, not an error, when there are no records.
    async fn list_students(&self) -> StorageResult<Vec<Student>>;

    /// A human-readable name for this engine, used in logging
    fn name(&self) -> &str;
}
