//! Plausibility checks for caret candidates.
//!
//! Validation is a pure function of the candidate and the window
//! rectangles captured for the tick.

use thiserror::Error;

use crate::model::constants::*;
use crate::model::{ScreenPoint, ScreenRect};

/// Which rectangle a resolver's output must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Focused control, [`FOCUSED_CONTROL_TOLERANCE_PX`] margin.
    FocusedControl,
    /// Foreground window, [`FOREGROUND_WINDOW_TOLERANCE_PX`] margin.
    ForegroundWindow,
}

/// Window rectangles a candidate is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    pub foreground: Option<ScreenRect>,
    pub focused_control: Option<ScreenRect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("both coordinates are <= 0")]
    Degenerate,
    #[error("within {WINDOW_ORIGIN_TOLERANCE_PX}px of the foreground window origin")]
    WindowOrigin,
    #[error("no foreground window to check against")]
    NoForegroundWindow,
    #[error("no focused control to check against")]
    NoFocusedControl,
    #[error("outside the foreground window (+{0}px)")]
    OutsideForegroundWindow(i32),
    #[error("outside the focused control (+{0}px)")]
    OutsideFocusedControl(i32),
}

/// Both coordinates at or below zero.
pub fn is_degenerate(p: ScreenPoint) -> bool {
    p.x <= 0 && p.y <= 0
}

/// Within [`WINDOW_ORIGIN_TOLERANCE_PX`] of `window`'s top-left on both axes.
pub fn is_near_window_origin(p: ScreenPoint, window: &ScreenRect) -> bool {
    let dx = (p.x - window.left).abs();
    let dy = (p.y - window.top).abs();
    dx <= WINDOW_ORIGIN_TOLERANCE_PX && dy <= WINDOW_ORIGIN_TOLERANCE_PX
}

/// Inside `rect` grown by `tolerance` on every side.
pub fn is_inside(p: ScreenPoint, rect: &ScreenRect, tolerance: i32) -> bool {
    rect.inflate(tolerance).contains(p)
}

/// Non-degenerate, not-window-origin and loose foreground containment.
pub fn validate_shared(p: ScreenPoint, ctx: &ValidationContext) -> Result<(), Rejection> {
    if is_degenerate(p) {
        return Err(Rejection::Degenerate);
    }
    let foreground = ctx.foreground.ok_or(Rejection::NoForegroundWindow)?;
    if is_near_window_origin(p, &foreground) {
        return Err(Rejection::WindowOrigin);
    }
    if !is_inside(p, &foreground, SECONDARY_WINDOW_TOLERANCE_PX) {
        return Err(Rejection::OutsideForegroundWindow(
            SECONDARY_WINDOW_TOLERANCE_PX,
        ));
    }
    Ok(())
}

/// Resolver-specific containment.
pub fn validate_containment(
    p: ScreenPoint,
    containment: Containment,
    ctx: &ValidationContext,
) -> Result<(), Rejection> {
    match containment {
        Containment::FocusedControl => {
            let control = ctx.focused_control.ok_or(Rejection::NoFocusedControl)?;
            if !is_inside(p, &control, FOCUSED_CONTROL_TOLERANCE_PX) {
                return Err(Rejection::OutsideFocusedControl(
                    FOCUSED_CONTROL_TOLERANCE_PX,
                ));
            }
        }
        Containment::ForegroundWindow => {
            let window = ctx.foreground.ok_or(Rejection::NoForegroundWindow)?;
            if !is_inside(p, &window, FOREGROUND_WINDOW_TOLERANCE_PX) {
                return Err(Rejection::OutsideForegroundWindow(
                    FOREGROUND_WINDOW_TOLERANCE_PX,
                ));
            }
        }
    }
    Ok(())
}

/// Full check for a candidate from a validated resolver.
pub fn validate(
    p: ScreenPoint,
    containment: Containment,
    ctx: &ValidationContext,
) -> Result<(), Rejection> {
    validate_shared(p, ctx)?;
    validate_containment(p, containment, ctx)
}
