//! Persisted settings types.
//!
//! Settings persist across sessions in a single JSON file. A missing
//! file yields defaults; a malformed file is an error the caller can
//! surface without clobbering the operator's data.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tw_common::{DetectionLevel, Error, Result};

use crate::SETTINGS_SCHEMA_VERSION;

/// Complete persisted settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub schema_version: String,

    /// Detection level read at session start.
    #[serde(default)]
    pub detection_level: DetectionLevel,

    /// Output directory for captured artifacts. `None` means the
    /// platform default data directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION.to_string(),
            detection_level: DetectionLevel::default(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// A missing file is not an error: defaults are returned so first
    /// run needs no setup step.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidSettings(format!("{}: {}", path.display(), e)))
    }

    /// Save settings to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// The effective artifact output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::resolve::default_output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.detection_level, DetectionLevel::Hard);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.detection_level = DetectionLevel::VeryHard;
        settings.output_dir = Some(PathBuf::from("/tmp/artifacts"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn malformed_file_is_invalid_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.code(), 11);
    }
}
