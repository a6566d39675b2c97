//! Schema type definitions
//!
//! A record schema is an ordered table of field declarations. Each field
//! carries a semantic type, a presence rule and a list of constraints that
//! the generic validator evaluates after coercion.
//!
//! Supported types:
//! - text: UTF-8 string
//! - integer: 64-bit signed integer
//! - decimal: 64-bit floating point
//! - boolean: Boolean

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::errors::SchemaStructureError;
use crate::records::RecordKind;

/// Semantic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
    /// Boolean
    Boolean,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Decimal)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A coerced field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl FieldValue {
    /// Returns the semantic type of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Decimal(_) => FieldType::Decimal,
            FieldValue::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Converts back to a JSON value for error reporting
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Decimal(d) => serde_json::Value::from(*d),
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// Whether a field must be supplied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "presence", content = "default", rename_all = "snake_case")]
pub enum Presence {
    /// Absent or null input is a missing-field error
    Required,
    /// Absent or null input leaves the field empty
    Optional,
    /// Absent or null input takes the given value
    Default(FieldValue),
}

/// Field-level constraint evaluated after coercion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "constraint", content = "limit", rename_all = "snake_case")]
pub enum Constraint {
    /// Numeric value must be >= limit
    Ge(f64),
    /// Numeric value must be <= limit
    Le(f64),
    /// Text must have at least this many characters
    MinLength(usize),
    /// Text must have at most this many characters
    MaxLength(usize),
    /// Text must be a syntactically valid email address
    Email,
}

impl Constraint {
    /// Returns true if the constraint can be applied to the field type
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        match self {
            Constraint::Ge(_) | Constraint::Le(_) => field_type.is_numeric(),
            Constraint::MinLength(_) | Constraint::MaxLength(_) | Constraint::Email => {
                field_type == FieldType::Text
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Ge(limit) => write!(f, "ge={}", limit),
            Constraint::Le(limit) => write!(f, "le={}", limit),
            Constraint::MinLength(len) => write!(f, "min_length={}", len),
            Constraint::MaxLength(len) => write!(f, "max_length={}", len),
            Constraint::Email => f.write_str("email"),
        }
    }
}

/// A single field declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(flatten)]
    pub presence: Presence,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    pub description: &'static str,
}

impl FieldDef {
    /// Create a required field
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            presence: Presence::Required,
            constraints: Vec::new(),
            description: "",
        }
    }

    /// Create an optional field
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            presence: Presence::Optional,
            ..Self::required(name, field_type)
        }
    }

    /// Create a field that falls back to `default` when absent
    pub fn with_default(name: &'static str, default: FieldValue) -> Self {
        Self {
            name,
            field_type: default.field_type(),
            presence: Presence::Default(default),
            constraints: Vec::new(),
            description: "",
        }
    }

    /// Adds a constraint
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Sets the human-readable description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// Complete schema for one record kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSchema {
    pub kind: RecordKind,
    pub description: &'static str,
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    /// Create a new schema
    pub fn new(kind: RecordKind, description: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            kind,
            description,
            fields,
        }
    }

    /// Looks up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.is_required()).map(|f| f.name)
    }

    /// Validates the schema table itself (not a document)
    pub fn validate_structure(&self) -> Result<(), SchemaStructureError> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaStructureError::EmptyFieldName { kind: self.kind });
            }

            if !seen.insert(field.name) {
                return Err(SchemaStructureError::DuplicateField {
                    kind: self.kind,
                    field: field.name,
                });
            }

            if let Presence::Default(value) = &field.presence {
                if value.field_type() != field.field_type {
                    return Err(SchemaStructureError::DefaultTypeMismatch {
                        kind: self.kind,
                        field: field.name,
                        expected: field.field_type,
                        actual: value.field_type(),
                    });
                }
            }

            if let Some(constraint) = field
                .constraints
                .iter()
                .find(|c| !c.applies_to(field.field_type))
            {
                return Err(SchemaStructureError::InapplicableConstraint {
                    kind: self.kind,
                    field: field.name,
                    constraint: constraint.to_string(),
                    field_type: field.field_type,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> RecordSchema {
        RecordSchema::new(
            RecordKind::User,
            "sample",
            vec![
                FieldDef::required("name", FieldType::Text).constrain(Constraint::MinLength(1)),
                FieldDef::optional("age", FieldType::Integer)
                    .constrain(Constraint::Ge(0.0))
                    .constrain(Constraint::Le(120.0)),
                FieldDef::with_default("is_active", FieldValue::Boolean(true)),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut schema = sample_schema();
        schema.fields.push(FieldDef::optional("name", FieldType::Text));

        let err = schema.validate_structure().unwrap_err();
        assert!(matches!(err, SchemaStructureError::DuplicateField { field: "name", .. }));
    }

    #[test]
    fn test_length_constraint_on_integer_rejected() {
        let schema = RecordSchema::new(
            RecordKind::Product,
            "broken",
            vec![FieldDef::required("count", FieldType::Integer).constrain(Constraint::MaxLength(3))],
        );

        let err = schema.validate_structure().unwrap_err();
        assert!(err.to_string().contains("max_length=3"));
    }

    #[test]
    fn test_default_must_match_type() {
        let mut field = FieldDef::with_default("in_stock", FieldValue::Boolean(true));
        field.field_type = FieldType::Text;
        let schema = RecordSchema::new(RecordKind::Product, "broken", vec![field]);

        assert!(matches!(
            schema.validate_structure(),
            Err(SchemaStructureError::DefaultTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_required_fields_in_order() {
        let schema = sample_schema();
        let required: Vec<_> = schema.required_fields().collect();
        assert_eq!(required, vec!["name"]);
    }

    #[test]
    fn test_constraint_display() {
        assert_eq!(Constraint::Ge(0.0).to_string(), "ge=0");
        assert_eq!(Constraint::Le(120.0).to_string(), "le=120");
        assert_eq!(Constraint::MinLength(2).to_string(), "min_length=2");
        assert_eq!(Constraint::Email.to_string(), "email");
    }

    #[test]
    fn test_field_def_serializes_presence_and_type() {
        let field = FieldDef::with_default("is_active", FieldValue::Boolean(true))
            .describe("Whether user is active");
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["name"], "is_active");
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["presence"], "default");
        assert_eq!(json["default"], true);
        assert!(json.get("constraints").is_none());
    }
}
