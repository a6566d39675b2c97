//! Generic validator that evaluates a schema table against raw input
//!
//! Validation semantics:
//! - Required fields must be present and non-null
//! - Present values are coerced to the declared type
//! - Constraints are checked only after successful coercion
//! - Defaults are substituted for absent fields
//! - Every field is checked; all errors are reported together
//!
//! Validation is pure. It never logs, writes, or mutates its input.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::coerce::coerce;
use super::email::{is_valid_email, normalize_email};
use super::errors::{FieldError, ValidationFailure, ValidationResult};
use super::types::{Constraint, FieldDef, FieldType, FieldValue, Presence, RecordSchema};
use crate::records::RecordKind;

/// Pseudo-field used when the input itself is not a mapping
pub const ROOT_FIELD: &str = "$root";

/// What to do with input keys the schema does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Report each one as an unexpected-field error
    Reject,
}

/// Schema validator. Holds only policy; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    unknown_fields: UnknownFieldPolicy,
}

impl SchemaValidator {
    /// Creates a validator that ignores undeclared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given policy for undeclared fields.
    pub fn with_unknown_field_policy(unknown_fields: UnknownFieldPolicy) -> Self {
        Self { unknown_fields }
    }

    pub fn unknown_field_policy(&self) -> UnknownFieldPolicy {
        self.unknown_fields
    }

    /// Validates raw input against a schema.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailure` carrying every field error found, or a
    /// single `$root` type mismatch when the input is not a JSON object.
    pub fn validate(&self, schema: &RecordSchema, raw: &Value) -> ValidationResult<ValidatedFields> {
        let obj = raw.as_object().ok_or_else(|| {
            ValidationFailure::new(
                schema.kind,
                vec![FieldError::type_mismatch(ROOT_FIELD, "object", raw)],
            )
        })?;

        let mut errors = Vec::new();
        let mut values = HashMap::with_capacity(schema.fields.len());

        for field in &schema.fields {
            if let Some(value) = validate_field(field, obj.get(field.name), &mut errors) {
                values.insert(field.name, value);
            }
        }

        if self.unknown_fields == UnknownFieldPolicy::Reject {
            errors.extend(undeclared_fields(schema, obj).map(FieldError::unexpected));
        }

        if errors.is_empty() {
            Ok(ValidatedFields {
                kind: schema.kind,
                values,
            })
        } else {
            Err(ValidationFailure::new(schema.kind, errors))
        }
    }
}

/// Validates one field. Pushes any errors and returns the value to store.
fn validate_field(
    field: &FieldDef,
    raw: Option<&Value>,
    errors: &mut Vec<FieldError>,
) -> Option<FieldValue> {
    // Null is treated exactly like an absent key
    let raw = match raw {
        Some(value) if !value.is_null() => value,
        _ => {
            return match &field.presence {
                Presence::Required => {
                    errors.push(FieldError::missing(field.name));
                    None
                }
                Presence::Optional => None,
                Presence::Default(default) => Some(default.clone()),
            };
        }
    };

    let Some(value) = coerce(raw, field.field_type) else {
        errors.push(FieldError::type_mismatch(
            field.name,
            field.field_type.type_name(),
            raw,
        ));
        return None;
    };
    let value = normalize(field, value);

    let before = errors.len();
    errors.extend(
        field
            .constraints
            .iter()
            .filter(|c| !satisfies(c, &value))
            .map(|c| FieldError::constraint(field.name, c.clone(), value.to_json())),
    );

    (errors.len() == before).then_some(value)
}

/// Email fields are checked and stored in normalized form.
fn normalize(field: &FieldDef, value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) if field.constraints.contains(&Constraint::Email) => {
            FieldValue::Text(normalize_email(&s))
        }
        other => other,
    }
}

/// Evaluates a constraint against an already-coerced value.
fn satisfies(constraint: &Constraint, value: &FieldValue) -> bool {
    match (constraint, value) {
        (Constraint::Ge(limit), FieldValue::Integer(i)) => *i as f64 >= *limit,
        (Constraint::Ge(limit), FieldValue::Decimal(d)) => *d >= *limit,
        (Constraint::Le(limit), FieldValue::Integer(i)) => *i as f64 <= *limit,
        (Constraint::Le(limit), FieldValue::Decimal(d)) => *d <= *limit,
        (Constraint::MinLength(min), FieldValue::Text(s)) => s.chars().count() >= *min,
        (Constraint::MaxLength(max), FieldValue::Text(s)) => s.chars().count() <= *max,
        (Constraint::Email, FieldValue::Text(s)) => is_valid_email(s),
        // Structure checks keep inapplicable constraints out of the tables
        _ => true,
    }
}

fn undeclared_fields<'a>(
    schema: &'a RecordSchema,
    obj: &'a Map<String, Value>,
) -> impl Iterator<Item = &'a str> + 'a {
    let mut keys: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|key| schema.field(key).is_none())
        .collect();
    keys.sort_unstable();
    keys.into_iter()
}

/// Coerced field values of a successful pass, keyed by field name.
///
/// Typed records take their values out of this container. Optional fields
/// that were absent have no entry; defaulted fields always do.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    kind: RecordKind,
    values: HashMap<&'static str, FieldValue>,
}

impl ValidatedFields {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    fn take_as<T>(
        &mut self,
        name: &'static str,
        expected: FieldType,
        unwrap: fn(FieldValue) -> Result<T, FieldValue>,
    ) -> Result<Option<T>, FieldError> {
        match self.values.remove(name) {
            None => Ok(None),
            Some(value) => unwrap(value)
                .map(Some)
                .map_err(|other| FieldError::type_mismatch(name, expected.type_name(), &other.to_json())),
        }
    }

    pub fn optional_text(&mut self, name: &'static str) -> Result<Option<String>, FieldError> {
        self.take_as(name, FieldType::Text, |v| match v {
            FieldValue::Text(s) => Ok(s),
            other => Err(other),
        })
    }

    pub fn optional_integer(&mut self, name: &'static str) -> Result<Option<i64>, FieldError> {
        self.take_as(name, FieldType::Integer, |v| match v {
            FieldValue::Integer(i) => Ok(i),
            other => Err(other),
        })
    }

    pub fn optional_decimal(&mut self, name: &'static str) -> Result<Option<f64>, FieldError> {
        self.take_as(name, FieldType::Decimal, |v| match v {
            FieldValue::Decimal(d) => Ok(d),
            other => Err(other),
        })
    }

    pub fn optional_boolean(&mut self, name: &'static str) -> Result<Option<bool>, FieldError> {
        self.take_as(name, FieldType::Boolean, |v| match v {
            FieldValue::Boolean(b) => Ok(b),
            other => Err(other),
        })
    }

    pub fn text(&mut self, name: &'static str) -> Result<String, FieldError> {
        self.optional_text(name)?.ok_or_else(|| FieldError::missing(name))
    }

    pub fn decimal(&mut self, name: &'static str) -> Result<f64, FieldError> {
        self.optional_decimal(name)?.ok_or_else(|| FieldError::missing(name))
    }

    pub fn boolean(&mut self, name: &'static str) -> Result<bool, FieldError> {
        self.optional_boolean(name)?.ok_or_else(|| FieldError::missing(name))
    }
}
