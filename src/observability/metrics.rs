//! Validation counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics: shareable across threads without locking

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for validation passes run by a consumer
#[derive(Debug, Default)]
pub struct ValidationMetrics {
    records_accepted: AtomicU64,
    records_rejected: AtomicU64,
    field_errors: AtomicU64,
    inputs_malformed: AtomicU64,
}

impl ValidationMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.records_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one rejected input carrying `error_count` field errors
    pub fn record_rejected(&self, error_count: usize) {
        self.records_rejected.fetch_add(1, Ordering::Relaxed);
        self.field_errors
            .fetch_add(error_count as u64, Ordering::Relaxed);
    }

    pub fn input_malformed(&self) {
        self.inputs_malformed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_accepted: self.records_accepted.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            field_errors: self.field_errors.load(Ordering::Relaxed),
            inputs_malformed: self.inputs_malformed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub records_accepted: u64,
    pub records_rejected: u64,
    pub field_errors: u64,
    pub inputs_malformed: u64,
}

impl MetricsSnapshot {
    /// Total inputs seen, decodable or not
    pub fn inputs_total(&self) -> u64 {
        self.records_accepted + self.records_rejected + self.inputs_malformed
    }

    /// Counters as (key, value) pairs for log fields
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("field_errors", self.field_errors.to_string()),
            ("inputs_malformed", self.inputs_malformed.to_string()),
            ("records_accepted", self.records_accepted.to_string()),
            ("records_rejected", self.records_rejected.to_string()),
        ]
    }
}
