//! Data models for the student registry
//!
//! Defines the stored record (`Student`), the decoded request body
//! (`StudentPayload`) and the validated input to storage (`NewStudent`).

use serde::{Deserialize, Serialize};

/// A stored student record
///
/// Records are write-once: once created, a record is never modified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    /// Identifier assigned by the storage engine
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address, unique across all records
    pub email: String,
    /// Age in years
    pub age: i64,
}

impl Student {
    /// Build a record from validated input and an assigned identifier
    pub fn from_new(id: i64, new: NewStudent) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            age: new.age,
        }
    }
}

/// Student-shaped request body, before validation
///
/// Every field is optional so that an absent key can be told apart from a
/// present one. Unknown keys, including a caller-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Validated input for creating a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}
