//! Windows-specific implementation using Win32, MSAA, UI Automation and
//! Direct2D.
//!
//! This module contains all Windows-specific code:
//! - OS queries behind the `PlatformQuery` / `Monitors` traits
//! - UI Automation caret ranges
//! - UI components (layered overlay window, tray icon)
//! - Storage (reading `appsettings.json`)

pub mod app;
pub mod automation;
pub mod query;
pub mod storage;
pub mod ui;

pub use query::Win32Platform;
