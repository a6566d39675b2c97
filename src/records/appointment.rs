//! Appointment requests submitted from the website
//!
//! Collection name: "appointmentrequest"
//!
//! These requests must not carry protected health information. Nothing
//! here inspects message content: the submitter attests through
//! `confirmed_no_phi`, and any content screening belongs to the consumer.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use super::{Record, RecordKind};
use crate::schema::{
    Constraint, FieldDef, FieldError, FieldType, RecordSchema, ValidatedFields, ValidationFailure,
};

static APPOINTMENT_SCHEMA: OnceLock<RecordSchema> = OnceLock::new();

/// A validated appointment request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRequest {
    full_name: String,
    phone: String,
    email: String,
    preferred_datetime: Option<String>,
    message: Option<String>,
    confirmed_no_phi: bool,
}

impl AppointmentRequest {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Free-form text as typed by the requester; not parsed
    pub fn preferred_datetime(&self) -> Option<&str> {
        self.preferred_datetime.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The requester's attestation that no medical information was sent
    pub fn confirmed_no_phi(&self) -> bool {
        self.confirmed_no_phi
    }
}

impl Record for AppointmentRequest {
    const KIND: RecordKind = RecordKind::AppointmentRequest;

    fn schema() -> &'static RecordSchema {
        APPOINTMENT_SCHEMA.get_or_init(|| {
            RecordSchema::new(
                RecordKind::AppointmentRequest,
                "Appointment requests submitted from website (non-PHI)",
                vec![
                    FieldDef::required("full_name", FieldType::Text)
                        .constrain(Constraint::MinLength(2))
                        .constrain(Constraint::MaxLength(120))
                        .describe("Full name"),
                    FieldDef::required("phone", FieldType::Text)
                        .constrain(Constraint::MinLength(7))
                        .constrain(Constraint::MaxLength(40))
                        .describe("Contact phone number"),
                    FieldDef::required("email", FieldType::Text)
                        .constrain(Constraint::Email)
                        .describe("Contact email address"),
                    FieldDef::optional("preferred_datetime", FieldType::Text)
                        .describe("Preferred date/time text from user"),
                    FieldDef::optional("message", FieldType::Text)
                        .constrain(Constraint::MaxLength(1000))
                        .describe("General non-medical message"),
                    FieldDef::required("confirmed_no_phi", FieldType::Boolean)
                        .describe("User confirmed no medical info submitted"),
                ],
            )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, FieldError> {
        Ok(Self {
            full_name: fields.text("full_name")?,
            phone: fields.text("phone")?,
            email: fields.text("email")?,
            preferred_datetime: fields.optional_text("preferred_datetime")?,
            message: fields.optional_text("message")?,
            confirmed_no_phi: fields.boolean("confirmed_no_phi")?,
        })
    }
}

impl TryFrom<&Value> for AppointmentRequest {
    type Error = ValidationFailure;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        AppointmentRequest::validate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Value {
        json!({
            "full_name": "Jo",
            "phone": "555-0100",
            "email": "jo@example.com",
            "confirmed_no_phi": true
        })
    }

    #[test]
    fn test_minimal_request() {
        let req = AppointmentRequest::validate(&request()).unwrap();
        assert_eq!(req.full_name(), "Jo");
        assert_eq!(req.phone(), "555-0100");
        assert_eq!(req.preferred_datetime(), None);
        assert_eq!(req.message(), None);
        assert!(req.confirmed_no_phi());
    }

    #[test]
    fn test_full_name_length() {
        let mut raw = request();
        raw["full_name"] = json!("J");
        let failure = AppointmentRequest::validate(&raw).unwrap_err();
        assert_eq!(
            failure.errors(),
            &[FieldError::constraint("full_name", Constraint::MinLength(2), json!("J"))]
        );

        raw["full_name"] = json!("x".repeat(121));
        assert!(AppointmentRequest::validate(&raw).is_err());

        raw["full_name"] = json!("x".repeat(120));
        assert!(AppointmentRequest::validate(&raw).is_ok());
    }

    #[test]
    fn test_phone_length() {
        let mut raw = request();
        raw["phone"] = json!("555010");
        assert!(AppointmentRequest::validate(&raw).unwrap_err().has_error_for("phone"));

        raw["phone"] = json!("5550100");
        assert!(AppointmentRequest::validate(&raw).is_ok());

        raw["phone"] = json!("1".repeat(41));
        assert!(AppointmentRequest::validate(&raw).unwrap_err().has_error_for("phone"));
    }

    #[test]
    fn test_message_length() {
        let mut raw = request();
        raw["message"] = json!("m".repeat(1000));
        assert!(AppointmentRequest::validate(&raw).is_ok());

        raw["message"] = json!("m".repeat(1001));
        assert!(AppointmentRequest::validate(&raw).unwrap_err().has_error_for("message"));
    }

    #[test]
    fn test_confirmed_no_phi_is_required_but_may_be_false() {
        let mut raw = request();
        raw["confirmed_no_phi"] = json!(false);
        assert!(!AppointmentRequest::validate(&raw).unwrap().confirmed_no_phi());

        raw.as_object_mut().unwrap().remove("confirmed_no_phi");
        let failure = AppointmentRequest::validate(&raw).unwrap_err();
        assert_eq!(failure.errors(), &[FieldError::missing("confirmed_no_phi")]);
    }

    #[test]
    fn test_preferred_datetime_is_free_form() {
        let mut raw = request();
        raw["preferred_datetime"] = json!("next tuesday-ish, after lunch");
        let req = AppointmentRequest::validate(&raw).unwrap();
        assert_eq!(req.preferred_datetime(), Some("next tuesday-ish, after lunch"));
    }
}
