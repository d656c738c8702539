//! Settings file location for Windows.
//!
//! Reads `appsettings.json` from the executable's directory.

mod config;

pub use config::*;
