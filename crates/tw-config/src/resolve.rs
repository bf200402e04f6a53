//! Settings path resolution and directory discovery.
//!
//! Resolution order: explicit path → environment variables → XDG paths →
//! built-in default.

use std::path::{Path, PathBuf};

/// Where the settings path was resolved from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// XDG config directory.
    XdgConfig,

    /// Built-in default (current directory).
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved settings path with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Environment variable overriding the config directory.
const ENV_CONFIG_DIR: &str = "TRIPWATCH_CONFIG_DIR";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "tripwatch";

/// Resolve the settings file path.
///
/// Resolution order:
/// 1. Explicit CLI path (if provided)
/// 2. TRIPWATCH_CONFIG_DIR environment variable + filename
/// 3. XDG config directory (~/.config/tripwatch/)
/// 4. ./settings.json as a last resort
///
/// Unlike load-time discovery, the resolved path does not need to exist:
/// it is also the write target for `level` updates.
pub fn resolve_settings_path(cli_path: Option<&Path>) -> ResolvedPath {
    if let Some(path) = cli_path {
        return ResolvedPath {
            path: path.to_path_buf(),
            source: ConfigSource::CliArgument,
        };
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        return ResolvedPath {
            path: PathBuf::from(config_dir).join(SETTINGS_FILENAME),
            source: ConfigSource::Environment,
        };
    }

    if let Some(xdg_config) = dirs::config_dir() {
        return ResolvedPath {
            path: xdg_config.join(APP_NAME).join(SETTINGS_FILENAME),
            source: ConfigSource::XdgConfig,
        };
    }

    ResolvedPath {
        path: PathBuf::from(SETTINGS_FILENAME),
        source: ConfigSource::BuiltinDefault,
    }
}

/// Default output directory for captured artifacts.
///
/// XDG data directory (~/.local/share/tripwatch/) when available,
/// otherwise the current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
