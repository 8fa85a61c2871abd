//! In-memory storage engine
//!
//! Keeps records in a `BTreeMap` behind a tokio `RwLock`. Data lives only as
//! long as the store. Enforces the same email uniqueness and id rules as the
//! SQLite engine, which makes it a drop-in test double for handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{NewStudent, Student};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::StudentStore;

#[derive(Debug, Default)]
struct MemoryState {
    /// Last id handed out; never decremented
    last_id: i64,
    students: BTreeMap<i64, Student>,
}

/// Process-local student store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.state.read().await.students.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.students.is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn create_student(&self, student: &NewStudent) -> StorageResult<i64> {
        let mut state = self.state.write().await;

        if state.students.values().any(|s| s.email == student.email) {
            return Err(StorageError::Conflict {
                email: student.email.clone(),
            });
        }

        state.last_id += 1;
        let id = state.last_id;
        state
            .students
            .insert(id, Student::from_new(id, student.clone()));
        Ok(id)
    }

    async fn get_student(&self, id: i64) -> StorageResult<Student> {
        self.state
            .read()
            .await
            .students
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound { id })
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        Ok(self.state.read().await.students.values().cloned().collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
