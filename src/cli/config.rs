//! Configuration file for the CLI consumer
//!
//! ```json
//! {
//!   "collections": { "User": "users", "appointment-request": "appointments" },
//!   "reject_unknown_fields": true
//! }
//! ```
//!
//! Every key is optional. Collection names are owned by the persistence
//! side; kinds without an entry use their lower-cased identifier.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::records::RecordKind;
use crate::schema::{SchemaValidator, UnknownFieldPolicy};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Collection name overrides, keyed by record kind (default: none)
    #[serde(default)]
    pub collections: BTreeMap<String, String>,

    /// Report undeclared input fields as errors (default: false)
    #[serde(default)]
    pub reject_unknown_fields: bool,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file if a path is given, else use defaults
    pub fn load_optional(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        let mut seen = BTreeMap::new();

        for (key, collection) in &self.collections {
            let kind: RecordKind = key
                .parse()
                .map_err(|e| CliError::config_error(format!("Invalid collections key: {}", e)))?;

            if let Some(previous) = seen.insert(kind, key) {
                return Err(CliError::config_error(format!(
                    "Collections keys '{}' and '{}' both name {}",
                    previous, key, kind
                )));
            }

            if collection.is_empty() || collection.chars().any(char::is_whitespace) {
                return Err(CliError::config_error(format!(
                    "Invalid collection name for {}: '{}'",
                    kind, collection
                )));
            }
        }

        Ok(())
    }

    /// Storage collection for a record kind
    pub fn collection_for(&self, kind: RecordKind) -> &str {
        self.collections
            .iter()
            .find(|(key, _)| key.parse::<RecordKind>().ok() == Some(kind))
            .map(|(_, collection)| collection.as_str())
            .unwrap_or_else(|| kind.default_collection())
    }

    /// Builds the validator this configuration asks for
    pub fn validator(&self) -> SchemaValidator {
        let policy = if self.reject_unknown_fields {
            UnknownFieldPolicy::Reject
        } else {
            UnknownFieldPolicy::Ignore
        };
        SchemaValidator::with_unknown_field_policy(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.collection_for(RecordKind::User), "user");
        assert_eq!(
            config.collection_for(RecordKind::AppointmentRequest),
            "appointmentrequest"
        );
        assert_eq!(config.validator().unknown_field_policy(), UnknownFieldPolicy::Ignore);
    }

    #[test]
    fn test_load_overrides() {
        let file = write_config(
            r#"{"collections": {"User": "users", "appointment-request": "appointments"},
                "reject_unknown_fields": true}"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.collection_for(RecordKind::User), "users");
        assert_eq!(config.collection_for(RecordKind::AppointmentRequest), "appointments");
        assert_eq!(config.collection_for(RecordKind::Product), "product");
        assert_eq!(config.validator().unknown_field_policy(), UnknownFieldPolicy::Reject);
    }

    #[test]
    fn test_empty_object_is_valid() {
        let file = write_config("{}");
        assert_eq!(Config::load(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_kind_key_rejected() {
        let file = write_config(r#"{"collections": {"BlogPost": "blogs"}}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert_eq!(err.code_str(), "INTAKE_CLI_CONFIG_ERROR");
        assert!(err.message().contains("BlogPost"));
    }

    #[test]
    fn test_duplicate_kind_keys_rejected() {
        let file = write_config(r#"{"collections": {"User": "users", "user": "people"}}"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_blank_collection_name_rejected() {
        let file = write_config(r#"{"collections": {"Product": "my products"}}"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/intake.json")).unwrap_err();
        assert_eq!(err.code_str(), "INTAKE_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_load_optional_without_path() {
        assert_eq!(Config::load_optional(None).unwrap(), Config::default());
    }
}
