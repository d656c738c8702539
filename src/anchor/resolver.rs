//! The four anchor strategies, in priority order.

use std::fmt;

use tracing::trace;

use super::validate::Containment;
use crate::model::constants::{MAX_MOUSE_OFFSET, MIN_MOUSE_OFFSET};
use crate::model::{RectF, ScreenPoint};
use crate::platform::{CaretRange, PlatformQuery};

/// Where an anchor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSource {
    NativeCaret,
    Accessibility,
    Automation,
    MouseFallback,
}

impl fmt::Display for AnchorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnchorSource::NativeCaret => "native caret",
            AnchorSource::Accessibility => "accessibility",
            AnchorSource::Automation => "ui automation",
            AnchorSource::MouseFallback => "mouse fallback",
        })
    }
}

/// A point tagged with the resolver that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCandidate {
    pub point: ScreenPoint,
    pub source: AnchorSource,
}

/// One strategy of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    NativeCaret,
    Accessibility,
    Automation,
    MouseFallback { offset_x: i32, offset_y: i32 },
}

impl Resolver {
    pub fn source(&self) -> AnchorSource {
        match self {
            Resolver::NativeCaret => AnchorSource::NativeCaret,
            Resolver::Accessibility => AnchorSource::Accessibility,
            Resolver::Automation => AnchorSource::Automation,
            Resolver::MouseFallback { .. } => AnchorSource::MouseFallback,
        }
    }

    /// Containment the output must pass; `None` means accepted unconditionally.
    pub fn containment(&self) -> Option<Containment> {
        match self {
            Resolver::NativeCaret => Some(Containment::FocusedControl),
            Resolver::Accessibility | Resolver::Automation => Some(Containment::ForegroundWindow),
            Resolver::MouseFallback { .. } => None,
        }
    }

    pub fn try_resolve<P: PlatformQuery + ?Sized>(&self, platform: &P) -> Option<AnchorCandidate> {
        let point = match *self {
            Resolver::NativeCaret => native_caret(platform),
            Resolver::Accessibility => accessible_caret(platform),
            Resolver::Automation => automation_caret(platform),
            Resolver::MouseFallback { offset_x, offset_y } => {
                mouse_fallback(platform, offset_x, offset_y)
            }
        }?;
        Some(AnchorCandidate {
            point,
            source: self.source(),
        })
    }
}

/// Bottom-left of the OS caret rectangle, in screen coordinates.
pub fn native_caret<P: PlatformQuery + ?Sized>(platform: &P) -> Option<ScreenPoint> {
    platform.foreground_window()?;
    let gti = platform.gui_thread_info()?;
    let target = gti.caret_target()?;
    let client = ScreenPoint::new(gti.caret_rect.left, gti.caret_rect.bottom);
    platform.client_to_screen(target, client)
}

/// Just below the MSAA caret object.
pub fn accessible_caret<P: PlatformQuery + ?Sized>(platform: &P) -> Option<ScreenPoint> {
    platform.foreground_window()?;
    let target = platform.gui_thread_info()?.any_target()?;
    let location = platform.accessible_caret_location(target)?;
    let (width, height) = (location.width(), location.height());
    if width <= 0 && height <= 0 {
        return None;
    }
    Some(ScreenPoint::new(
        location.left,
        location.top + height.max(1),
    ))
}

/// Bottom-left of the UI Automation caret range, escalating on empty ranges.
pub fn automation_caret<P: PlatformQuery + ?Sized>(platform: &P) -> Option<ScreenPoint> {
    let range = platform.focused_caret_range()?;
    let rects = caret_rects(&range)?;
    rects.first().map(RectF::bottom_left)
}

fn caret_rects<R: CaretRange>(range: &R) -> Option<Vec<RectF>> {
    if let Some(rects) = non_empty(range.bounding_rects()) {
        return Some(rects);
    }

    let mut probe = range.duplicate()?;
    if probe.expand_to_character() {
        if let Some(rects) = non_empty(probe.bounding_rects()) {
            trace!("Caret range expanded to enclosing character");
            return Some(rects);
        }
    }
    if probe.move_end_by_character() {
        if let Some(rects) = non_empty(probe.bounding_rects()) {
            trace!("Caret range end moved by one character");
            return Some(rects);
        }
    }
    None
}

fn non_empty(rects: Option<Vec<RectF>>) -> Option<Vec<RectF>> {
    rects.filter(|r| !r.is_empty())
}

/// Pointer position plus an offset clamped to [0, 120] on each axis.
pub fn mouse_fallback<P: PlatformQuery + ?Sized>(
    platform: &P,
    offset_x: i32,
    offset_y: i32,
) -> Option<ScreenPoint> {
    let cursor = platform.cursor_position().unwrap_or_default();
    Some(cursor.offset(
        offset_x.clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET),
        offset_y.clamp(MIN_MOUSE_OFFSET, MAX_MOUSE_OFFSET),
    ))
}
