//! Error types for Tripwatch.
//!
//! Structured error handling with stable codes, category classification,
//! and recoverability hints. Presentation and capture failures are
//! non-fatal by contract: the monitor logs them and stays tripped. The
//! monitor's own malfunction must never be worse than the fault it is
//! trying to surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Tripwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings file and level persistence errors.
    Config,
    /// Overlay surface creation/destruction errors from the host.
    Presentation,
    /// Screenshot write errors from the host.
    Capture,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Presentation => write!(f, "presentation"),
            ErrorCategory::Capture => write!(f, "capture"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Tripwatch.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid settings file: {0}")]
    InvalidSettings(String),

    // Presentation errors (20-29)
    #[error("overlay host failed to create surface: {0}")]
    SurfaceCreate(String),

    #[error("overlay host failed to destroy surface: {0}")]
    SurfaceDestroy(String),

    // Capture errors (30-39)
    #[error("screenshot capture failed: {0}")]
    CaptureFailed(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSettings(_) => 11,
            Error::SurfaceCreate(_) => 20,
            Error::SurfaceDestroy(_) => 21,
            Error::CaptureFailed(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) => ErrorCategory::Config,
            Error::SurfaceCreate(_) | Error::SurfaceDestroy(_) => ErrorCategory::Presentation,
            Error::CaptureFailed(_) => ErrorCategory::Capture,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Presentation and capture failures are recoverable in the sense
    /// that the session continues; they are never retried automatically.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidSettings(_) => true,
            Error::SurfaceCreate(_) => true,
            Error::SurfaceDestroy(_) => true,
            Error::CaptureFailed(_) => true,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSettings(_) => "Invalid Settings File",
            Error::SurfaceCreate(_) => "Overlay Creation Failed",
            Error::SurfaceDestroy(_) => "Overlay Teardown Failed",
            Error::CaptureFailed(_) => "Screenshot Capture Failed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Format an error for human-readable stderr output.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, reset) = if use_color { ("\x1b[31m", "\x1b[0m") } else { ("", "") };
    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}",
        red = red,
        reset = reset,
        headline = err.headline(),
        message = err
    )
}
