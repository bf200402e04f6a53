//! Severity classification policy.
//!
//! A thin, pure entry point over the precomputed panic sets in
//! `tw_common::severity`. No state, no side effects: the state machine
//! calls this once per delivered event.

use tw_common::{DetectionLevel, Severity};

/// Whether an event with `severity` constitutes a panic at `level`.
///
/// Total over both enums; tags outside the level's set never trip.
pub fn is_panic(level: DetectionLevel, severity: Severity) -> bool {
    level.is_panic(severity)
}
