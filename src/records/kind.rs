//! Record kind identifiers

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::{AppointmentRequest, Product, Record, User};
use crate::schema::RecordSchema;

/// One of the declared record shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RecordKind {
    User,
    Product,
    AppointmentRequest,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::User,
        RecordKind::Product,
        RecordKind::AppointmentRequest,
    ];

    /// Returns the kind identifier, e.g. "AppointmentRequest"
    pub fn identifier(&self) -> &'static str {
        match self {
            RecordKind::User => "User",
            RecordKind::Product => "Product",
            RecordKind::AppointmentRequest => "AppointmentRequest",
        }
    }

    /// Returns the conventional storage collection: the lower-cased identifier.
    ///
    /// Persistence layers may map kinds to other names; see the CLI config.
    pub fn default_collection(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Product => "product",
            RecordKind::AppointmentRequest => "appointmentrequest",
        }
    }

    /// Returns the declared schema for this kind
    pub fn schema(&self) -> &'static RecordSchema {
        match self {
            RecordKind::User => User::schema(),
            RecordKind::Product => Product::schema(),
            RecordKind::AppointmentRequest => AppointmentRequest::schema(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Returned when a string names no record kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record kind '{0}' (expected one of: user, product, appointment-request)")]
pub struct UnknownRecordKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    /// Case-insensitive; '-' and '_' are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.default_collection() == normalized)
            .ok_or_else(|| UnknownRecordKind(s.to_string()))
    }
}
