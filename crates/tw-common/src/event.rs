//! Log events and trip records.
//!
//! `LogEvent` is the ephemeral unit delivered by the host's logging
//! facility; it is evaluated once and dropped. The one event that trips
//! the monitor is retained as a `TripRecord` for display and reporting.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// A single diagnostic log event from the host's log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Short fault description (the log message / condition).
    pub message: String,

    /// Stack trace captured at the emission site, possibly empty.
    #[serde(default)]
    pub stack_trace: String,

    /// Severity tag assigned by the emitter.
    pub severity: Severity,
}

impl LogEvent {
    pub fn new(
        message: impl Into<String>,
        stack_trace: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
            severity,
        }
    }

    /// Parse an event from a single JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// The text rendered on the alert overlay: message, newline, trace.
    pub fn alert_text(&self) -> String {
        format!("{}\n{}", self.message, self.stack_trace)
    }
}

/// The retained record of the event that tripped a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub message: String,
    pub stack_trace: String,
    pub severity: Severity,
}

impl TripRecord {
    pub fn alert_text(&self) -> String {
        format!("{}\n{}", self.message, self.stack_trace)
    }

    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"error":"serialization_failed","message":{:?}}}"#, self.message)
        })
    }
}

impl From<&LogEvent> for TripRecord {
    fn from(event: &LogEvent) -> Self {
        Self {
            message: event.message.clone(),
            stack_trace: event.stack_trace.clone(),
            severity: event.severity,
        }
    }
}
