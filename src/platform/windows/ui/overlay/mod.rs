//! Overlay rendering module.

pub mod renderer;

pub use renderer::{render_overlay, DWriteMeasure, D2D_FACTORY, DWRITE_FACTORY};
