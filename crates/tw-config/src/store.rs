//! The level persistence seam.
//!
//! The control surface and the session driver read the detection level
//! through `LevelStore` rather than touching the settings file directly,
//! so tests can substitute an in-memory double.

use std::path::PathBuf;
use std::sync::Mutex;

use tw_common::{DetectionLevel, Result};

use crate::settings::Settings;

/// Get/set of the persisted detection level.
pub trait LevelStore {
    fn level(&self) -> Result<DetectionLevel>;
    fn set_level(&self, level: DetectionLevel) -> Result<()>;
}

/// File-backed store over the settings file.
///
/// Reads go to disk each time so an external edit between sessions is
/// picked up; the session itself caches the level at start and never
/// re-reads mid-session.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn settings(&self) -> Result<Settings> {
        Settings::load(&self.path)
    }
}

impl LevelStore for SettingsStore {
    fn level(&self) -> Result<DetectionLevel> {
        Ok(Settings::load(&self.path)?.detection_level)
    }

    fn set_level(&self, level: DetectionLevel) -> Result<()> {
        let mut settings = Settings::load(&self.path)?;
        settings.detection_level = level;
        settings.save(&self.path)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    level: Mutex<DetectionLevel>,
}

impl MemoryStore {
    pub fn new(level: DetectionLevel) -> Self {
        Self {
            level: Mutex::new(level),
        }
    }
}

impl LevelStore for MemoryStore {
    fn level(&self) -> Result<DetectionLevel> {
        Ok(*self.level.lock().unwrap())
    }

    fn set_level(&self, level: DetectionLevel) -> Result<()> {
        *self.level.lock().unwrap() = level;
        Ok(())
    }
}
