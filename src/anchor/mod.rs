//! Anchor resolution: where on screen the overlay should sit.
//!
//! Resolvers are tried in priority order (native caret, MSAA caret, UI
//! Automation caret, pointer). Each caret candidate must pass the
//! validators before it is accepted; the pointer is accepted as-is.
//! Failures are silent and simply fall through to the next resolver.

pub mod pipeline;
pub mod resolver;
pub mod validate;

pub use pipeline::AnchorPipeline;
pub use resolver::{AnchorCandidate, AnchorSource, Resolver};
pub use validate::{Containment, Rejection, ValidationContext};
