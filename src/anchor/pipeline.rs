//! Ordered resolver chain with early exit.

use tracing::debug;

use super::resolver::{AnchorCandidate, Resolver};
use super::validate::{validate, ValidationContext};
use crate::model::Settings;
use crate::platform::PlatformQuery;

/// Resolvers tried in priority order; the first validated output wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPipeline {
    resolvers: Vec<Resolver>,
}

impl AnchorPipeline {
    /// Native caret, accessibility, UI Automation, then (optionally) the
    /// mouse fallback with the given offset.
    pub fn new(mouse_offset: Option<(i32, i32)>) -> Self {
        let mut resolvers = vec![
            Resolver::NativeCaret,
            Resolver::Accessibility,
            Resolver::Automation,
        ];
        if let Some((offset_x, offset_y)) = mouse_offset {
            resolvers.push(Resolver::MouseFallback { offset_x, offset_y });
        }
        Self { resolvers }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings
                .mouse_fallback_enabled
                .then(|| settings.mouse_offset()),
        )
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    /// True when the chain ends in the mouse fallback and therefore never
    /// returns `None`.
    pub fn is_total(&self) -> bool {
        matches!(self.resolvers.last(), Some(Resolver::MouseFallback { .. }))
    }

    /// Best anchor for this tick, or `None` when every resolver failed and
    /// the mouse fallback is disabled.
    pub fn resolve<P: PlatformQuery + ?Sized>(&self, platform: &P) -> Option<AnchorCandidate> {
        let ctx = ValidationContext {
            foreground: platform.foreground_rect(),
            focused_control: platform.focused_control_rect(),
        };
        self.resolve_with(platform, &ctx)
    }

    /// Like [`AnchorPipeline::resolve`] with pre-captured window rectangles.
    pub fn resolve_with<P: PlatformQuery + ?Sized>(
        &self,
        platform: &P,
        ctx: &ValidationContext,
    ) -> Option<AnchorCandidate> {
        for resolver in &self.resolvers {
            let Some(candidate) = resolver.try_resolve(platform) else {
                continue;
            };
            let Some(containment) = resolver.containment() else {
                return Some(candidate);
            };
            match validate(candidate.point, containment, ctx) {
                Ok(()) => return Some(candidate),
                Err(rejection) => debug!(
                    "Rejected {} candidate ({}, {}): {}",
                    candidate.source, candidate.point.x, candidate.point.y, rejection
                ),
            }
        }
        None
    }
}

impl Default for AnchorPipeline {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
