//! Observable events emitted by the CLI consumer
//!
//! The validation layer itself never emits events.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded and checked
    ConfigLoaded,
    /// A stream of inputs started
    StreamStart,
    /// A stream of inputs reached end of input
    StreamComplete,
    /// An input passed validation
    RecordAccepted,
    /// An input failed validation
    RecordRejected,
    /// An input line was not decodable JSON
    InputMalformed,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StreamStart => "STREAM_START",
            Event::StreamComplete => "STREAM_COMPLETE",
            Event::RecordAccepted => "RECORD_ACCEPTED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::InputMalformed => "INPUT_MALFORMED",
        }
    }

    /// Rejected or undecodable input is worth a warning; the rest is routine
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::RecordRejected | Event::InputMalformed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::RecordAccepted.as_str(), "RECORD_ACCEPTED");
        assert_eq!(Event::StreamComplete.to_string(), "STREAM_COMPLETE");
    }

    #[test]
    fn test_warning_events() {
        assert!(Event::RecordRejected.is_warning());
        assert!(Event::InputMalformed.is_warning());
        assert!(!Event::ConfigLoaded.is_warning());
    }
}
