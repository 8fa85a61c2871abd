//! Student Registry Core Library
//!
//! This crate provides the domain side of the student registry: the record
//! type, payload validation, and the storage engines behind a common
//! capability trait.
//!
//! # Architecture
//!
//! - **StudentStore**: create / get-by-id / list contract that request
//!   handlers depend on
//! - **SqliteStore**: the persistent engine
//! - **MemoryStore**: in-process engine used as a test double
//!
//! # Quick Start
//!
//! ```text
//! let store = SqliteStore::open(&config.storage_path, config.schema_policy())?;
//! let validator = Validator::new();
//!
//! let new = validator.validate(payload)?;
//! let id = store.create_student(&new).await?;
//! let student = store.get_student(id).await?;
//! ```
//!
//! # Modules
//!
//! - `models`: Student record and request payload
//! - `validation`: Field rules with batched violations
//! - `storage`: Capability trait, SQLite and memory engines
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod validation;

pub use config::{Config, HttpServerConfig};
pub use models::{NewStudent, Student, StudentPayload};
pub use storage::{
    ErrorKind, MemoryStore, SchemaPolicy, SqliteStore, StorageError, StorageResult, StudentStore,
};
pub use validation::{FieldViolation, ValidationErrors, Validator, ViolationReason};
