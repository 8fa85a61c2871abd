//! SQLite storage engine
//!
//! Owns a single connection. Each operation runs on the blocking pool and
//! holds the connection lock for one statement, so concurrent inserts with
//! the same email are serialized and the loser sees a conflict.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::models::{NewStudent, Student};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::schema::{apply_policy, SchemaPolicy};
use crate::storage::StudentStore;

/// SQLite-backed student store
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database file and bring up the schema
    pub fn open(path: &Path, policy: SchemaPolicy) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = ?path, ?policy, "opened SQLite database");
        Self::with_connection(conn, policy)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, SchemaPolicy::Preserve)
    }

    fn with_connection(conn: Connection, policy: SchemaPolicy) -> StorageResult<Self> {
        apply_policy(&conn, policy)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking pool
    async fn run<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StorageError::LockPoisoned)?;
            op(&*guard)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[async_trait]
impl StudentStore for SqliteStore {
    async fn create_student(&self, student: &NewStudent) -> StorageResult<i64> {
        let student = student.clone();
        self.run(move |conn| insert_student(conn, &student)).await
    }

    async fn get_student(&self, id: i64) -> StorageResult<Student> {
        self.run(move |conn| select_student(conn, id)).await
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        self.run(select_all_students).await
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

// ==================== Statement helpers ====================

fn insert_student(conn: &Connection, student: &NewStudent) -> StorageResult<i64> {
    conn.execute(
        "INSERT INTO students (name, email, age) VALUES (?, ?, ?)",
        params![student.name, student.email, student.age],
    )
    .map_err(|e| StorageError::from_insert(e, &student.email))?;

    // Still under the caller's lock, so this is our row
    Ok(conn.last_insert_rowid())
}

fn select_student(conn: &Connection, id: i64) -> StorageResult<Student> {
    let mut stmt = conn.prepare("SELECT id, name, email, age FROM students WHERE id = ?")?;
    stmt.query_row(params![id], student_from_row)
        .map_err(|e| StorageError::from_lookup(e, id))
}

fn select_all_students(conn: &Connection) -> StorageResult<Vec<Student>> {
    let mut stmt = conn.prepare("SELECT id, name, email, age FROM students ORDER BY id")?;

    // A failing row aborts the scan; the partial vector is dropped with it
    let students = stmt
        .query_map([], student_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(students)
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}
