//! `appsettings.json` next to the executable.
//!
//! Read once at startup. A missing or broken file means built-in defaults;
//! nothing is ever written back.

use std::path::PathBuf;

use crate::model::{Settings, SettingsSource};

/// Settings file name, looked up beside the executable.
pub const SETTINGS_FILE: &str = "appsettings.json";

/// Get config file path: `<exe dir>/appsettings.json`
pub fn settings_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE)
}

/// Clamped settings from [`settings_path`] plus where they came from.
pub fn load_settings() -> (Settings, SettingsSource) {
    Settings::load(&settings_path())
}
