//! UI components for Windows.

pub mod overlay;
pub mod tray;

pub use overlay::*;
pub use tray::*;
