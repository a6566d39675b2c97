//! User record
//!
//! Collection name: "user"

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use super::{Record, RecordKind};
use crate::schema::{
    Constraint, FieldDef, FieldError, FieldType, FieldValue, RecordSchema, ValidatedFields,
    ValidationFailure,
};

static USER_SCHEMA: OnceLock<RecordSchema> = OnceLock::new();

/// A validated user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    name: String,
    email: String,
    address: Option<String>,
    age: Option<i64>,
    is_active: bool,
}

impl User {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Age in years, 0..=120
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn schema() -> &'static RecordSchema {
        USER_SCHEMA.get_or_init(|| {
            RecordSchema::new(
                RecordKind::User,
                "Users collection schema",
                vec![
                    FieldDef::required("name", FieldType::Text).describe("Full name"),
                    FieldDef::required("email", FieldType::Text)
                        .constrain(Constraint::Email)
                        .describe("Email address"),
                    FieldDef::optional("address", FieldType::Text).describe("Address"),
                    FieldDef::optional("age", FieldType::Integer)
                        .constrain(Constraint::Ge(0.0))
                        .constrain(Constraint::Le(120.0))
                        .describe("Age in years"),
                    FieldDef::with_default("is_active", FieldValue::Boolean(true))
                        .describe("Whether user is active"),
                ],
            )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, FieldError> {
        Ok(Self {
            name: fields.text("name")?,
            email: fields.text("email")?,
            address: fields.optional_text("address")?,
            age: fields.optional_integer("age")?,
            is_active: fields.boolean("is_active")?,
        })
    }
}

impl TryFrom<&Value> for User {
    type Error = ValidationFailure;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        User::validate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_user() {
        let user = User::validate(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "address": "1 Main St",
            "age": 30,
            "is_active": false
        }))
        .unwrap();

        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.address(), Some("1 Main St"));
        assert_eq!(user.age(), Some(30));
        assert!(!user.is_active());
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let user = User::validate(&json!({ "name": "Bob", "email": "bob@example.com" })).unwrap();
        assert!(user.is_active());
        assert_eq!(user.address(), None);
        assert_eq!(user.age(), None);
    }

    #[test]
    fn test_age_bounds() {
        for age in [0, 120] {
            let raw = json!({ "name": "A", "email": "a@b.com", "age": age });
            assert!(User::validate(&raw).is_ok(), "age {} should pass", age);
        }

        for age in [-1, 121] {
            let raw = json!({ "name": "A", "email": "a@b.com", "age": age });
            let failure = User::validate(&raw).unwrap_err();
            assert_eq!(failure.errors().len(), 1);
            assert!(matches!(
                &failure.errors()[0],
                FieldError::ConstraintViolation { field, .. } if field == "age"
            ));
        }
    }

    #[test]
    fn test_email_format() {
        let failure = User::validate(&json!({ "name": "A", "email": "not-an-email" })).unwrap_err();
        assert_eq!(
            failure.errors(),
            &[FieldError::constraint("email", Constraint::Email, json!("not-an-email"))]
        );
    }

    #[test]
    fn test_email_is_normalized() {
        let user = User::validate(&json!({ "name": "A", "email": " ada@example.com " })).unwrap();
        assert_eq!(user.email(), "ada@example.com");

        let user = User::validate(&json!({ "name": "A", "email": "ada@EXAMPLE.com" })).unwrap();
        assert_eq!(user.email(), "ada@example.com");
    }

    #[test]
    fn test_try_from_value() {
        let raw = json!({ "name": "Cy", "email": "cy@example.com" });
        let user = User::try_from(&raw).unwrap();
        assert_eq!(user.name(), "Cy");
    }
}
