//! Level control surface.
//!
//! Exposes the detection levels as mutually exclusive checkable options,
//! persists the operator's choice through the injected `LevelStore`, and
//! offers a best-effort reveal of the artifact output directory. The
//! state machine reads the persisted level once per session at start;
//! selections made mid-session apply to the next session.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use tw_common::{DetectionLevel, Result};
use tw_config::LevelStore;

use crate::hosts::RevealHost;

/// One checkable option in the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelOption {
    pub level: DetectionLevel,
    pub label: &'static str,
    pub checked: bool,
}

/// Operator-facing control surface over the persisted detection level.
#[derive(Debug)]
pub struct LevelControl<S: LevelStore> {
    store: S,
}

impl<S: LevelStore> LevelControl<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The currently persisted level.
    pub fn selected(&self) -> Result<DetectionLevel> {
        self.store.level()
    }

    /// Persist a new level selection.
    pub fn select(&self, level: DetectionLevel) -> Result<()> {
        self.store.set_level(level)
    }

    /// All five options with exactly one checked.
    pub fn options(&self) -> Result<Vec<LevelOption>> {
        let selected = self.store.level()?;
        Ok(DetectionLevel::ALL
            .iter()
            .map(|&level| LevelOption {
                level,
                label: level.label(),
                checked: level == selected,
            })
            .collect())
    }

    /// Open the artifact output directory in the host's file browser.
    ///
    /// Best-effort: platform-dependent, failure is logged and swallowed.
    pub fn reveal(&self, host: &dyn RevealHost, output_dir: &Path) {
        if let Err(err) = host.open_directory(output_dir) {
            debug!(error = %err, dir = %output_dir.display(), "reveal failed");
        }
    }
}
