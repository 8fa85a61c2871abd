//! Field validation for incoming student payloads
//!
//! The validator checks every field and collects all violations, so a
//! rejected request gets one combined report instead of only the first
//! problem.
//!
//! ## Required semantics
//!
//! - `name`, `email`: missing when the key is absent, `null` or `""`;
//!   invalid when the value is only whitespace.
//! - `age`: missing only when the key is absent or `null`. Zero and
//!   negative values are accepted.

use std::fmt;

use thiserror::Error;

use crate::models::{NewStudent, StudentPayload};

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// Field was absent or empty
    Missing,
    /// Field was present but failed a rule
    Invalid(&'static str),
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: ViolationReason,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ViolationReason::Missing => write!(f, "field {} is required", self.field),
            ViolationReason::Invalid(rule) => {
                write!(f, "field {} failed validation: {}", self.field, rule)
            }
        }
    }
}

/// All violations found in one payload, in field order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the rejected fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stateless rule set for student payloads
///
/// Construct once and hand it to whoever needs it; it holds no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a decoded payload
    ///
    /// Returns the validated input on success, or every violation found.
    pub fn validate(&self, payload: StudentPayload) -> Result<NewStudent, ValidationErrors> {
        let mut violations = Vec::new();

        let name = check_text("name", payload.name, &mut violations);
        let email = check_text("email", payload.email, &mut violations);
        let age = payload.age;
        if age.is_none() {
            violations.push(FieldViolation {
                field: "age",
                reason: ViolationReason::Missing,
            });
        }

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) if violations.is_empty() => {
                Ok(NewStudent { name, email, age })
            }
            _ => Err(ValidationErrors { violations }),
        }
    }
}

fn check_text(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation {
                field,
                reason: ViolationReason::Missing,
            });
            None
        }
        Some(v) if v.is_empty() => {
            violations.push(FieldViolation {
                field,
                reason: ViolationReason::Missing,
            });
            None
        }
        Some(v) if v.trim().is_empty() => {
            violations.push(FieldViolation {
                field,
                reason: ViolationReason::Invalid("must not be blank"),
            });
            None
        }
        Some(v) => Some(v),
    }
}
