//! intake-schema - declarative validation for intake records
//!
//! Raw JSON from web forms is checked against a declared schema table
//! before it becomes a typed `User`, `Product` or `AppointmentRequest`.

pub mod cli;
pub mod observability;
pub mod records;
pub mod schema;

pub use records::{validate_record, AnyRecord, Record, RecordKind};
pub use schema::{FieldError, SchemaValidator, ValidationFailure};
