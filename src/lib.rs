//! Keyboard-layout beacon: shows the active input language next to the
//! text caret of the focused application.
//!
//! Everything outside `platform::windows` is pure Rust so tests can run as
//! normal integration tests against a fake platform.

pub mod anchor;
pub mod layout;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod platform;
pub mod poll;

// Re-export the types most callers need
pub use anchor::{AnchorCandidate, AnchorPipeline, AnchorSource};
pub use layout::LanguageCode;
pub use model::{ScreenPoint, ScreenRect, Settings};
pub use overlay::{OverlayState, Phase, Presenter};
pub use poll::{PollLoop, TickReport};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
