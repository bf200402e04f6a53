//! Tripwatch core - runtime fault-detection monitor.
//!
//! While a managed session is active, the monitor watches a stream of
//! diagnostic log events, classifies them against a configurable
//! detection level, and on first match trips: detection suspends, a
//! blocking alert overlay carries the fault message and stack trace,
//! and a screenshot artifact is captured for post-mortem review.
//!
//! The crate is organized leaf-first:
//! - [`classify`] - pure severity classification policy
//! - [`hosts`] - trait seams for the host's overlay/screenshot/reveal
//!   facilities and the log-stream subscription
//! - [`overlay`] - alert presenter owning the overlay surface lifetime
//! - [`capture`] - timestamped screenshot artifact capture
//! - [`monitor`] - the detection state machine
//! - [`control`] - operator-facing level control surface
//! - [`console`] - concrete console host adapters for the CLI

pub mod capture;
pub mod classify;
pub mod console;
pub mod control;
pub mod exit_codes;
pub mod hosts;
pub mod logging;
pub mod monitor;
pub mod overlay;

pub use monitor::{Monitor, SessionState};
