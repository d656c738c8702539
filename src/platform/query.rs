//! The OS boundary consumed by the core.
//!
//! Everything the anchor pipeline and the layout source need from the
//! operating system goes through these traits, so the core can be driven
//! by a fake in tests. Implementations swallow OS/COM errors and report
//! them as `None` / `false`.

use crate::model::{RectF, ScreenPoint, ScreenRect};

/// Opaque window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Opaque input-layout identifier (an `HKL` on Windows).
///
/// Compared by equality only; the low word carries the locale id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutId(pub usize);

impl LayoutId {
    /// Returned when there is no foreground window.
    pub const NONE: Self = Self(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Locale id from the low-order word.
    pub fn lcid(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
}

/// Per-thread GUI state of the foreground thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuiThreadInfo {
    pub active: Option<WindowHandle>,
    pub focus: Option<WindowHandle>,
    pub caret: Option<WindowHandle>,
    /// Caret rectangle in the caret window's client coordinates.
    pub caret_rect: ScreenRect,
}

impl GuiThreadInfo {
    /// Window owning the caret rectangle: caret window, else focus.
    pub fn caret_target(&self) -> Option<WindowHandle> {
        self.caret.or(self.focus)
    }

    /// Focused control: focus window, else active window.
    pub fn focus_target(&self) -> Option<WindowHandle> {
        self.focus.or(self.active)
    }

    /// Best window for accessibility queries: caret, focus, then active.
    pub fn any_target(&self) -> Option<WindowHandle> {
        self.caret.or(self.focus).or(self.active)
    }
}

/// A UI Automation text range positioned at the caret.
///
/// Each step reports success explicitly instead of raising.
pub trait CaretRange: Sized {
    /// Bounding rectangles of the range, `None` if empty or unavailable.
    fn bounding_rects(&self) -> Option<Vec<RectF>>;

    /// Independent copy of the range.
    fn duplicate(&self) -> Option<Self>;

    /// Expand to the enclosing character.
    fn expand_to_character(&mut self) -> bool;

    /// Move the end endpoint forward by one character.
    fn move_end_by_character(&mut self) -> bool;
}

/// Stateless platform queries.
pub trait PlatformQuery {
    type Range: CaretRange;

    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Layout of the foreground window's thread, [`LayoutId::NONE`] if none.
    fn foreground_layout(&self) -> LayoutId;

    /// Locale name (e.g. `en-US`) for a locale id.
    fn locale_name(&self, lcid: u16) -> Option<String>;

    /// GUI state of the foreground window's thread.
    fn gui_thread_info(&self) -> Option<GuiThreadInfo>;

    fn window_rect(&self, window: WindowHandle) -> Option<ScreenRect>;

    fn client_to_screen(&self, window: WindowHandle, point: ScreenPoint) -> Option<ScreenPoint>;

    /// Screen location of the MSAA caret object.
    fn accessible_caret_location(&self, window: WindowHandle) -> Option<ScreenRect>;

    /// Caret range of the UI Automation focused element.
    fn focused_caret_range(&self) -> Option<Self::Range>;

    fn cursor_position(&self) -> Option<ScreenPoint>;

    /// Bounding rectangle of the foreground window.
    fn foreground_rect(&self) -> Option<ScreenRect> {
        self.foreground_window().and_then(|w| self.window_rect(w))
    }

    /// Bounding rectangle of the focused control (focus, else active window).
    fn focused_control_rect(&self) -> Option<ScreenRect> {
        self.gui_thread_info()
            .and_then(|gti| gti.focus_target())
            .and_then(|w| self.window_rect(w))
    }
}

/// Monitor work areas, used to keep the overlay on screen.
pub trait Monitors {
    /// Working area of the monitor containing `point`.
    fn work_area_at(&self, point: ScreenPoint) -> Option<ScreenRect>;

    fn primary_work_area(&self) -> Option<ScreenRect>;
}
