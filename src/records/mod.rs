//! Typed records produced by a validation pass
//!
//! Three independent, flat record kinds:
//! - `User` (collection "user")
//! - `Product` (collection "product")
//! - `AppointmentRequest` (collection "appointmentrequest")
//!
//! A record can only be obtained by validating raw input, and exposes its
//! fields through read-only accessors. An update is a new validation pass.

mod appointment;
mod kind;
mod product;
mod user;

pub use appointment::AppointmentRequest;
pub use kind::{RecordKind, UnknownRecordKind};
pub use product::Product;
pub use user::User;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{
    FieldError, RecordSchema, SchemaValidator, ValidatedFields, ValidationFailure,
    ValidationResult,
};

/// A record kind with a declared schema.
pub trait Record: Sized + Serialize {
    /// The kind this record type represents
    const KIND: RecordKind;

    /// The declared schema table
    fn schema() -> &'static RecordSchema;

    /// Builds the record from the values of a successful pass.
    fn from_fields(fields: ValidatedFields) -> Result<Self, FieldError>;

    /// Validates raw input with the default validator.
    fn validate(raw: &Value) -> ValidationResult<Self> {
        Self::validate_with(&SchemaValidator::new(), raw)
    }

    /// Validates raw input with the given validator.
    fn validate_with(validator: &SchemaValidator, raw: &Value) -> ValidationResult<Self> {
        let fields = validator.validate(Self::schema(), raw)?;
        Self::from_fields(fields).map_err(|e| ValidationFailure::new(Self::KIND, vec![e]))
    }
}

/// A validated record whose kind is only known at runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyRecord {
    User(User),
    Product(Product),
    AppointmentRequest(AppointmentRequest),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AnyRecord::User(_) => RecordKind::User,
            AnyRecord::Product(_) => RecordKind::Product,
            AnyRecord::AppointmentRequest(_) => RecordKind::AppointmentRequest,
        }
    }

    /// Returns the record as a JSON document ready for storage.
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl From<User> for AnyRecord {
    fn from(record: User) -> Self {
        AnyRecord::User(record)
    }
}

impl From<Product> for AnyRecord {
    fn from(record: Product) -> Self {
        AnyRecord::Product(record)
    }
}

impl From<AppointmentRequest> for AnyRecord {
    fn from(record: AppointmentRequest) -> Self {
        AnyRecord::AppointmentRequest(record)
    }
}

/// Validates raw input as the given kind.
pub fn validate_record(
    kind: RecordKind,
    raw: &Value,
    validator: &SchemaValidator,
) -> ValidationResult<AnyRecord> {
    match kind {
        RecordKind::User => User::validate_with(validator, raw).map(AnyRecord::from),
        RecordKind::Product => Product::validate_with(validator, raw).map(AnyRecord::from),
        RecordKind::AppointmentRequest => {
            AppointmentRequest::validate_with(validator, raw).map(AnyRecord::from)
        }
    }
}
