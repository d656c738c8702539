//! Fake platform shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use langbeacon::model::{RectF, ScreenPoint, ScreenRect};
use langbeacon::overlay::TextMeasure;
use langbeacon::platform::{
    CaretRange, GuiThreadInfo, LayoutId, Monitors, PlatformQuery, WindowHandle,
};

pub const FOREGROUND: WindowHandle = WindowHandle(1);
pub const EDIT: WindowHandle = WindowHandle(2);

/// en-US keyboard layout (HKL 0x04090409).
pub const LAYOUT_EN: LayoutId = LayoutId(0x0409_0409);
/// ru-RU keyboard layout (HKL 0x04190419).
pub const LAYOUT_RU: LayoutId = LayoutId(0x0419_0419);

/// A caret range whose rectangles depend on how far it was escalated.
#[derive(Debug, Clone, Default)]
pub struct FakeRange {
    pub initial: Option<Vec<RectF>>,
    pub after_expand: Option<Vec<RectF>>,
    pub after_move: Option<Vec<RectF>>,
    pub expand_ok: bool,
    pub move_ok: bool,
    pub duplicable: bool,
    pub stage: u8,
}

impl FakeRange {
    pub fn with_rect(rect: RectF) -> Self {
        Self {
            initial: Some(vec![rect]),
            duplicable: true,
            ..Default::default()
        }
    }
}

impl CaretRange for FakeRange {
    fn bounding_rects(&self) -> Option<Vec<RectF>> {
        match self.stage {
            0 => self.initial.clone(),
            1 => self.after_expand.clone(),
            _ => self.after_move.clone(),
        }
    }

    fn duplicate(&self) -> Option<Self> {
        self.duplicable.then(|| self.clone())
    }

    fn expand_to_character(&mut self) -> bool {
        if self.expand_ok {
            self.stage = 1;
        }
        self.expand_ok
    }

    fn move_end_by_character(&mut self) -> bool {
        if self.move_ok {
            self.stage = 2;
        }
        self.move_ok
    }
}

/// Canned OS state. Cells allow changes between poll ticks.
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub foreground: Cell<Option<WindowHandle>>,
    pub layout: Cell<LayoutId>,
    pub locales: HashMap<u16, String>,
    pub gui: Cell<Option<GuiThreadInfo>>,
    pub window_rects: HashMap<WindowHandle, ScreenRect>,
    pub accessible: Cell<Option<ScreenRect>>,
    pub caret_range: RefCell<Option<FakeRange>>,
    pub cursor: Cell<Option<ScreenPoint>>,
    pub work_area: Option<ScreenRect>,
    pub primary: Option<ScreenRect>,
}

impl FakePlatform {
    /// Foreground window (100,100)-(400,300) whose edit control fills it,
    /// en-US layout, pointer at (500,500), one 1920x1040 work area.
    pub fn desktop() -> Self {
        let mut window_rects = HashMap::new();
        window_rects.insert(FOREGROUND, ScreenRect::new(100, 100, 400, 300));
        window_rects.insert(EDIT, ScreenRect::new(100, 100, 400, 300));

        let mut locales = HashMap::new();
        locales.insert(0x0409, "en-US".to_string());
        locales.insert(0x0419, "ru-RU".to_string());

        Self {
            foreground: Cell::new(Some(FOREGROUND)),
            layout: Cell::new(LAYOUT_EN),
            locales,
            gui: Cell::new(Some(GuiThreadInfo {
                active: Some(FOREGROUND),
                focus: Some(EDIT),
                caret: None,
                caret_rect: ScreenRect::default(),
            })),
            window_rects,
            cursor: Cell::new(Some(ScreenPoint::new(500, 500))),
            work_area: Some(ScreenRect::new(0, 0, 1920, 1040)),
            primary: Some(ScreenRect::new(0, 0, 1920, 1040)),
            ..Default::default()
        }
    }

    /// Report a caret in `EDIT` whose bottom-left maps to `screen`.
    pub fn set_native_caret(&self, screen: ScreenPoint) {
        let origin = self.window_rects[&EDIT].top_left();
        let left = screen.x - origin.x;
        let bottom = screen.y - origin.y;
        self.gui.set(Some(GuiThreadInfo {
            active: Some(FOREGROUND),
            focus: Some(EDIT),
            caret: Some(EDIT),
            caret_rect: ScreenRect::new(left, bottom - 16, left + 1, bottom),
        }));
    }

    /// Focused edit control with no caret window.
    pub fn clear_native_caret(&self) {
        self.gui.set(Some(GuiThreadInfo {
            active: Some(FOREGROUND),
            focus: Some(EDIT),
            caret: None,
            caret_rect: ScreenRect::default(),
        }));
    }

    pub fn no_foreground(&self) {
        self.foreground.set(None);
        self.layout.set(LayoutId::NONE);
        self.gui.set(None);
    }
}

impl PlatformQuery for FakePlatform {
    type Range = FakeRange;

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground.get()
    }

    fn foreground_layout(&self) -> LayoutId {
        self.layout.get()
    }

    fn locale_name(&self, lcid: u16) -> Option<String> {
        self.locales.get(&lcid).cloned()
    }

    fn gui_thread_info(&self) -> Option<GuiThreadInfo> {
        self.gui.get()
    }

    fn window_rect(&self, window: WindowHandle) -> Option<ScreenRect> {
        self.window_rects.get(&window).copied()
    }

    fn client_to_screen(&self, window: WindowHandle, point: ScreenPoint) -> Option<ScreenPoint> {
        let origin = self.window_rects.get(&window)?.top_left();
        Some(point.offset(origin.x, origin.y))
    }

    fn accessible_caret_location(&self, _window: WindowHandle) -> Option<ScreenRect> {
        self.accessible.get()
    }

    fn focused_caret_range(&self) -> Option<FakeRange> {
        self.caret_range.borrow().clone()
    }

    fn cursor_position(&self) -> Option<ScreenPoint> {
        self.cursor.get()
    }
}

impl Monitors for FakePlatform {
    fn work_area_at(&self, _point: ScreenPoint) -> Option<ScreenRect> {
        self.work_area
    }

    fn primary_work_area(&self) -> Option<ScreenRect> {
        self.primary
    }
}

/// One pixel per character per point of font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str, font_size: f64) -> (i32, i32) {
        let chars = text.chars().count() as f64;
        ((chars * font_size).round() as i32, font_size.round() as i32)
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
