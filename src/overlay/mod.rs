//! Overlay presentation: visibility, pulse animation and geometry.

pub mod animation;
pub mod geometry;
pub mod presenter;

pub use geometry::{OverlayGeometry, TextMeasure};
pub use presenter::{OverlayState, Phase, Presenter, PulseTick, SwitchOutcome};
