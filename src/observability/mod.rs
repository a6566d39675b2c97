//! Observability for validation consumers
//!
//! Provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Validation counters
//!
//! Observability is read-only and synchronous. It has no effect on
//! validation outcomes, and the schema layer never calls into it.
//!
//! # Usage
//!
//! ```ignore
//! use intake_schema::observability::{log_event_with_fields, Event, ValidationMetrics};
//!
//! let metrics = ValidationMetrics::new();
//! metrics.record_accepted();
//! log_event_with_fields(Event::RecordAccepted, &[("kind", "User")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, ValidationMetrics};

fn severity_for(event: Event) -> Severity {
    if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(severity_for(Event::RecordRejected), Severity::Warn);
        assert_eq!(severity_for(Event::RecordAccepted), Severity::Info);
    }

    #[test]
    fn test_log_event_with_fields() {
        // This just verifies no panic
        log_event_with_fields(Event::RecordAccepted, &[("kind", "User")]);
    }
}
