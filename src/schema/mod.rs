//! Schema/validation subsystem
//!
//! Record schemas are declarative tables of fields, types, presence rules
//! and constraints. A single generic validator turns untyped JSON input
//! into coerced field values or a complete list of field errors.
//!
//! # Design Principles
//!
//! - Validation is a pure function of (schema, input)
//! - All field errors are collected; nothing is reported piecemeal
//! - Constraints run only on successfully coerced values
//! - Null and absent are the same thing
//! - No partial records

mod coerce;
mod email;
mod errors;
mod registry;
mod types;
mod validator;

pub use coerce::coerce;
pub use email::{is_valid_email, normalize_email};
pub use errors::{
    FieldError, FieldErrorCode, SchemaStructureError, ValidationFailure, ValidationResult,
};
pub use registry::SchemaRegistry;
pub use types::{Constraint, FieldDef, FieldType, FieldValue, Presence, RecordSchema};
pub use validator::{SchemaValidator, UnknownFieldPolicy, ValidatedFields, ROOT_FIELD};
