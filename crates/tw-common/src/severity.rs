//! Severity tags and detection levels.
//!
//! A detection level names an explicit set of severity tags considered
//! panic-worthy. The sets escalate monotonically: every level's set is a
//! strict superset of the previous level's set. The membership table is
//! precomputed rather than accumulated through fallthrough logic so the
//! monotonicity invariant can be checked directly.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Severity tag attached to a log event by the host's logging facility.
///
/// `Info` and `Debug` exist so benign traffic is representable; they are
/// never members of any detection level's panic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Exception,
    Assert,
    Error,
    Warning,
    Info,
    Debug,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Exception => "exception",
            Severity::Assert => "assert",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exception" => Ok(Severity::Exception),
            "assert" => Ok(Severity::Assert),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(format!("unknown severity tag: {}", s)),
        }
    }
}

/// Detection level selected by the operator.
///
/// Ordered from most permissive (`None`: nothing trips) to strictest
/// (`VeryHard`: warnings trip).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, ValueEnum, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetectionLevel {
    /// Panic set: {}
    None,
    /// Panic set: {Exception}
    Soft,
    /// Panic set: {Exception, Assert}
    Medium,
    /// Panic set: {Exception, Assert, Error}
    #[default]
    Hard,
    /// Panic set: {Exception, Assert, Error, Warning}
    VeryHard,
}

impl DetectionLevel {
    /// All levels in escalation order.
    pub const ALL: [DetectionLevel; 5] = [
        DetectionLevel::None,
        DetectionLevel::Soft,
        DetectionLevel::Medium,
        DetectionLevel::Hard,
        DetectionLevel::VeryHard,
    ];

    /// The explicit set of severity tags that trip at this level.
    pub fn panic_set(self) -> &'static [Severity] {
        match self {
            DetectionLevel::None => &[],
            DetectionLevel::Soft => &[Severity::Exception],
            DetectionLevel::Medium => &[Severity::Exception, Severity::Assert],
            DetectionLevel::Hard => &[Severity::Exception, Severity::Assert, Severity::Error],
            DetectionLevel::VeryHard => &[
                Severity::Exception,
                Severity::Assert,
                Severity::Error,
                Severity::Warning,
            ],
        }
    }

    /// Whether an event with this severity trips at this level.
    ///
    /// Pure and total: tags outside the level's set never trip (fail
    /// closed).
    pub fn is_panic(self, severity: Severity) -> bool {
        self.panic_set().contains(&severity)
    }

    pub fn label(self) -> &'static str {
        match self {
            DetectionLevel::None => "none",
            DetectionLevel::Soft => "soft",
            DetectionLevel::Medium => "medium",
            DetectionLevel::Hard => "hard",
            DetectionLevel::VeryHard => "very_hard",
        }
    }
}

impl std::fmt::Display for DetectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for DetectionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(DetectionLevel::None),
            "soft" => Ok(DetectionLevel::Soft),
            "medium" => Ok(DetectionLevel::Medium),
            "hard" => Ok(DetectionLevel::Hard),
            "very_hard" | "veryhard" | "very-hard" => Ok(DetectionLevel::VeryHard),
            _ => Err(format!("unknown detection level: {}", s)),
        }
    }
}
