//! Tripwatch settings loading and persistence.
//!
//! This crate provides:
//! - Typed Rust structs for settings.json
//! - Settings path resolution (explicit → env → XDG → defaults)
//! - The `LevelStore` seam the control surface and monitor read from

pub mod resolve;
pub mod settings;
pub mod store;

pub use resolve::{resolve_settings_path, ConfigSource, ResolvedPath};
pub use settings::Settings;
pub use store::{LevelStore, MemoryStore, SettingsStore};

/// Schema version for the settings file.
pub const SETTINGS_SCHEMA_VERSION: &str = "1.0.0";
