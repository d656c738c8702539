//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies)
//! including screen geometry, settings and configuration constants.
//!
//! Locating the settings file is in `platform::windows::storage`.

pub mod constants;
pub mod geometry;
pub mod settings;

pub use constants::*;
pub use geometry::{RectF, ScreenPoint, ScreenRect};
pub use settings::{ConfigError, Settings, SettingsSource};
