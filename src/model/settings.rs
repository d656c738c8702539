//! User settings (pure Rust, no FFI).
//!
//! Settings are read once at startup from `appsettings.json`. Every field
//! is optional in the file; missing fields take their defaults and
//! out-of-range values are clamped by [`Settings::validate`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::*;
use crate::clamp;

/// Why the settings file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file {path} could not be read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the effective settings came from.
#[derive(Debug)]
pub enum SettingsSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid(ConfigError),
}

/// Presentation and fallback settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Pulse length (persistent mode) or banner lifetime (legacy mode).
    pub banner_duration_ms: i64,
    /// Gap between anchor and overlay.
    pub banner_offset_px: i32,
    /// Keep the overlay visible and pulse on switches.
    pub persistent_banner_enabled: bool,
    /// Resting scale in persistent mode.
    pub persistent_banner_scale: f64,
    /// Peak scale on a layout switch.
    pub switch_banner_scale: f64,
    /// Font size in points at scale 1.0.
    pub base_font_size: f64,
    pub mouse_fallback_offset_x: i32,
    pub mouse_fallback_offset_y: i32,
    /// Follow the pointer when no caret can be found.
    pub mouse_fallback_enabled: bool,
    /// Verbose logging (honours `RUST_LOG`).
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            banner_duration_ms: DEFAULT_BANNER_DURATION_MS,
            banner_offset_px: DEFAULT_BANNER_OFFSET_PX,
            persistent_banner_enabled: DEFAULT_PERSISTENT_ENABLED,
            persistent_banner_scale: DEFAULT_PERSISTENT_SCALE,
            switch_banner_scale: DEFAULT_SWITCH_SCALE,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            mouse_fallback_offset_x: DEFAULT_MOUSE_OFFSET_X,
            mouse_fallback_offset_y: DEFAULT_MOUSE_OFFSET_Y,
            mouse_fallback_enabled: true,
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Validates and clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.banner_duration_ms = self
            .banner_duration_ms
            .clamp(MIN_BANNER_DURATION_MS, MAX_BANNER_DURATION_MS);
        self.banner_offset_px = self
            .banner_offset_px
            .clamp(MIN_BANNER_OFFSET_PX, MAX_BANNER_OFFSET_PX);
        self.persistent_banner_scale = clamp(
            finite_or(self.persistent_banner_scale, DEFAULT_PERSISTENT_SCALE),
            MIN_PERSISTENT_SCALE,
            MAX_PERSISTENT_SCALE,
        );
        self.switch_banner_scale = clamp(
            finite_or(self.switch_banner_scale, DEFAULT_SWITCH_SCALE),
            self.persistent_banner_scale,
            MAX_SWITCH_SCALE,
        );
        self.base_font_size = clamp(
            finite_or(self.base_font_size, DEFAULT_BASE_FONT_SIZE),
            MIN_FONT_SIZE,
            MAX_FONT_SIZE,
        );
        self.mouse_fallback_offset_x = self
            .mouse_fallback_offset_x
            .clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET);
        self.mouse_fallback_offset_y = self
            .mouse_fallback_offset_y
            .clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET);
    }

    /// Returns a clamped copy.
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }

    /// Effective pulse / auto-hide duration.
    pub fn banner_duration(&self) -> Duration {
        let ms = self
            .banner_duration_ms
            .clamp(MIN_BANNER_DURATION_MS, MAX_BANNER_DURATION_MS);
        Duration::from_millis(ms as u64)
    }

    pub fn banner_offset(&self) -> i32 {
        self.banner_offset_px
            .clamp(MIN_BANNER_OFFSET_PX, MAX_BANNER_OFFSET_PX)
    }

    pub fn base_scale(&self) -> f64 {
        clamp(
            finite_or(self.persistent_banner_scale, DEFAULT_PERSISTENT_SCALE),
            MIN_PERSISTENT_SCALE,
            MAX_PERSISTENT_SCALE,
        )
    }

    /// Never below [`Settings::base_scale`].
    pub fn switch_scale(&self) -> f64 {
        let base = self.base_scale();
        clamp(
            finite_or(self.switch_banner_scale, DEFAULT_SWITCH_SCALE),
            base,
            MAX_SWITCH_SCALE,
        )
        .max(base)
    }

    /// Pointer offset for the mouse fallback, each axis in [0, 120].
    pub fn mouse_offset(&self) -> (i32, i32) {
        (
            self.mouse_fallback_offset_x
                .clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET),
            self.mouse_fallback_offset_y
                .clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET),
        )
    }

    /// Parse settings from JSON text. Values are not clamped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from `path`.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load clamped settings from `path`, falling back to defaults when the
    /// file is missing or invalid. Nothing is logged here; the caller logs
    /// the returned [`SettingsSource`] once its subscriber is installed.
    pub fn load(path: &Path) -> (Self, SettingsSource) {
        if !path.exists() {
            return (Self::default(), SettingsSource::Missing(path.to_path_buf()));
        }
        match Self::read_from(path) {
            Ok(settings) => (settings.validated(), SettingsSource::File(path.to_path_buf())),
            Err(e) => (Self::default(), SettingsSource::Invalid(e)),
        }
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}
