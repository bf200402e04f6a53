//! Tripwatch common types, severities, and errors.
//!
//! This crate provides foundational types shared across tw-core modules:
//! - Severity tags and detection levels with explicit panic sets
//! - Log events and trip records
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod event;
pub mod output;
pub mod severity;

pub use error::{format_error_human, Error, Result};
pub use event::{LogEvent, TripRecord};
pub use output::OutputFormat;
pub use severity::{DetectionLevel, Severity};
