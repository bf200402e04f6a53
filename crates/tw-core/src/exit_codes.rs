//! Exit codes for the tripwatch CLI.
//!
//! Exit codes communicate session outcome without requiring output
//! parsing. These are stable:
//! - 0-1: session outcomes
//! - 10-19: user/environment errors
//! - 20-29: internal errors

/// Exit codes for tripwatch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Session ended without a trip.
    Clean = 0,

    /// Session tripped on a panic.
    Tripped = 1,

    /// Invalid arguments or malformed input.
    ArgsError = 10,

    /// Settings file missing, malformed, or unwritable.
    ConfigError = 11,

    /// Internal error (bug, should be reported).
    InternalError = 20,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ExitCode::Clean.code(), 0);
        assert_eq!(ExitCode::Tripped.code(), 1);
        assert_eq!(ExitCode::ArgsError.code(), 10);
        assert_eq!(ExitCode::ConfigError.code(), 11);
        assert_eq!(ExitCode::InternalError.code(), 20);
    }
}
