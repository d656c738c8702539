//! Platform boundary and platform-specific implementations.
//!
//! [`query`] defines the traits the core consumes. The `windows`
//! submodule implements them with Win32, MSAA and UI Automation and
//! hosts the overlay window.

pub mod query;

#[cfg(target_os = "windows")]
pub mod windows;

pub use query::{CaretRange, GuiThreadInfo, LayoutId, Monitors, PlatformQuery, WindowHandle};
