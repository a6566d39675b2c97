//! Schema error types
//!
//! Error codes:
//! - INTAKE_MISSING_FIELD
//! - INTAKE_TYPE_MISMATCH
//! - INTAKE_CONSTRAINT_VIOLATION
//! - INTAKE_UNEXPECTED_FIELD
//! - INTAKE_VALIDATION_FAILED (aggregate)
//!
//! Every validation error is recoverable. The caller gets the complete
//! list of field errors and decides whether to re-prompt or reject.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{Constraint, FieldType};
use crate::records::RecordKind;

/// Error codes for individual field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorCode {
    /// Required field absent or null
    IntakeMissingField,
    /// Value could not be coerced to the declared type
    IntakeTypeMismatch,
    /// Coerced value violates a declared constraint
    IntakeConstraintViolation,
    /// Undeclared field under a rejecting policy
    IntakeUnexpectedField,
}

impl FieldErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorCode::IntakeMissingField => "INTAKE_MISSING_FIELD",
            FieldErrorCode::IntakeTypeMismatch => "INTAKE_TYPE_MISMATCH",
            FieldErrorCode::IntakeConstraintViolation => "INTAKE_CONSTRAINT_VIOLATION",
            FieldErrorCode::IntakeUnexpectedField => "INTAKE_UNEXPECTED_FIELD",
        }
    }
}

impl fmt::Display for FieldErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single problem with one field of the input
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum FieldError {
    #[error("field '{field}': required field is missing")]
    MissingField { field: String },

    #[error("field '{field}': expected {expected}, got {received}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        received: Value,
    },

    #[error("field '{field}': value {value} violates {constraint}")]
    ConstraintViolation {
        field: String,
        constraint: Constraint,
        value: Value,
    },

    #[error("field '{field}': undeclared field is not allowed")]
    UnexpectedField { field: String },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        FieldError::MissingField {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, received: &Value) -> Self {
        FieldError::TypeMismatch {
            field: field.into(),
            expected,
            received: received.clone(),
        }
    }

    pub fn constraint(field: impl Into<String>, constraint: Constraint, value: Value) -> Self {
        FieldError::ConstraintViolation {
            field: field.into(),
            constraint,
            value,
        }
    }

    pub fn unexpected(field: impl Into<String>) -> Self {
        FieldError::UnexpectedField {
            field: field.into(),
        }
    }

    /// Returns the field this error is about
    pub fn field(&self) -> &str {
        match self {
            FieldError::MissingField { field }
            | FieldError::TypeMismatch { field, .. }
            | FieldError::ConstraintViolation { field, .. }
            | FieldError::UnexpectedField { field } => field,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FieldErrorCode {
        match self {
            FieldError::MissingField { .. } => FieldErrorCode::IntakeMissingField,
            FieldError::TypeMismatch { .. } => FieldErrorCode::IntakeTypeMismatch,
            FieldError::ConstraintViolation { .. } => FieldErrorCode::IntakeConstraintViolation,
            FieldError::UnexpectedField { .. } => FieldErrorCode::IntakeUnexpectedField,
        }
    }
}

/// Aggregate result of a rejected validation pass
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind} validation failed with {} error(s): {}", .errors.len(), summarize(&.errors))]
pub struct ValidationFailure {
    kind: RecordKind,
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub const CODE: &'static str = "INTAKE_VALIDATION_FAILED";

    pub fn new(kind: RecordKind, errors: Vec<FieldError>) -> Self {
        Self { kind, errors }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// All field errors, in field declaration order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Returns the errors reported for one field
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    /// Returns true if any error names the field
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors_for(field).next().is_some()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Problems in a schema table itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaStructureError {
    #[error("{kind} schema declares a field with an empty name")]
    EmptyFieldName { kind: RecordKind },

    #[error("{kind} schema declares field '{field}' more than once")]
    DuplicateField { kind: RecordKind, field: &'static str },

    #[error("{kind} schema field '{field}' is {expected} but its default is {actual}")]
    DefaultTypeMismatch {
        kind: RecordKind,
        field: &'static str,
        expected: FieldType,
        actual: FieldType,
    },

    #[error("{kind} schema field '{field}' is {field_type}, which does not support {constraint}")]
    InapplicableConstraint {
        kind: RecordKind,
        field: &'static str,
        constraint: String,
        field_type: FieldType,
    },
}

/// Result type for validation passes
pub type ValidationResult<T> = Result<T, ValidationFailure>;
