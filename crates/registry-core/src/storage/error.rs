//! Storage error handling
//!
//! Provides typed errors for storage operations and classifies them into
//! the three outcomes callers branch on: conflict, not found, or an
//! internal failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Another record already uses this email
    #[error("student with email '{email}' already exists")]
    Conflict { email: String },

    /// No record has this id
    #[error("student with id {id} not found")]
    NotFound { id: i64 },

    /// Failed to create the directory holding the database file
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to open the database file
    #[error("Failed to open database at '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A lock guarding the engine was poisoned by a panicking thread
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// The blocking task running the operation failed
    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Coarse classification of a storage error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    Internal,
}

impl StorageError {
    /// Classify a failed insert
    ///
    /// A uniqueness violation becomes `Conflict`; anything else stays a
    /// database error.
    pub fn from_insert(error: rusqlite::Error, email: &str) -> Self {
        if is_unique_violation(&error) {
            StorageError::Conflict {
                email: email.to_string(),
            }
        } else {
            StorageError::Database(error)
        }
    }

    /// Classify a failed point lookup
    pub fn from_lookup(error: rusqlite::Error, id: i64) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound { id },
            other => StorageError::Database(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Conflict { .. } => ErrorKind::Conflict,
            StorageError::NotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }
}

/// Check if a SQLite error is a UNIQUE constraint failure
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(err, _) => {
            err.code == rusqlite::ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
