//! Win32 / MSAA implementation of the platform boundary.

use std::ffi::c_void;

use tracing::{debug, warn};
use windows::core::Interface;
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Globalization::LCIDToLocaleName;
use windows::Win32::Graphics::Gdi::{
    ClientToScreen, GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONULL,
    MONITOR_DEFAULTTOPRIMARY,
};
use windows::Win32::System::Variant::VARIANT;
use windows::Win32::UI::Accessibility::{AccessibleObjectFromWindow, IAccessible, IUIAutomation};
use windows::Win32::UI::Input::KeyboardAndMouse::GetKeyboardLayout;
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetForegroundWindow, GetGUIThreadInfo, GetWindowRect, GetWindowThreadProcessId,
    GUITHREADINFO, OBJID_CARET,
};

use super::automation::{self, UiaCaretRange};
use crate::model::{ScreenPoint, ScreenRect};
use crate::platform::{GuiThreadInfo, LayoutId, Monitors, PlatformQuery, WindowHandle};

/// `LOCALE_NAME_MAX_LENGTH`
const LOCALE_NAME_MAX: usize = 85;

/// Live OS queries. Holds the UI Automation client, created once on the
/// UI thread after COM is initialised.
pub struct Win32Platform {
    automation: Option<IUIAutomation>,
}

impl Win32Platform {
    pub fn new() -> Self {
        let automation = automation::create_client();
        if automation.is_none() {
            warn!("UI Automation unavailable; caret lookup limited to Win32 and MSAA");
        }
        Self { automation }
    }
}

impl Default for Win32Platform {
    fn default() -> Self {
        Self::new()
    }
}

fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn to_handle(hwnd: HWND) -> Option<WindowHandle> {
    if hwnd.is_invalid() {
        None
    } else {
        Some(WindowHandle(hwnd.0 as isize))
    }
}

fn to_rect(r: RECT) -> ScreenRect {
    ScreenRect::new(r.left, r.top, r.right, r.bottom)
}

fn foreground_thread() -> Option<u32> {
    unsafe {
        let hwnd = GetForegroundWindow();
        if hwnd.is_invalid() {
            return None;
        }
        match GetWindowThreadProcessId(hwnd, None) {
            0 => None,
            tid => Some(tid),
        }
    }
}

impl PlatformQuery for Win32Platform {
    type Range = UiaCaretRange;

    fn foreground_window(&self) -> Option<WindowHandle> {
        to_handle(unsafe { GetForegroundWindow() })
    }

    fn foreground_layout(&self) -> LayoutId {
        match foreground_thread() {
            Some(tid) => LayoutId(unsafe { GetKeyboardLayout(tid) }.0 as usize),
            None => LayoutId::NONE,
        }
    }

    fn locale_name(&self, lcid: u16) -> Option<String> {
        let mut buf = [0u16; LOCALE_NAME_MAX];
        let len = unsafe { LCIDToLocaleName(u32::from(lcid), Some(&mut buf), 0) };
        if len <= 0 {
            return None;
        }
        // len includes the terminating null
        let chars = (len as usize).saturating_sub(1).min(buf.len());
        Some(String::from_utf16_lossy(&buf[..chars]))
    }

    fn gui_thread_info(&self) -> Option<GuiThreadInfo> {
        let tid = foreground_thread()?;
        let mut gti = GUITHREADINFO {
            cbSize: std::mem::size_of::<GUITHREADINFO>() as u32,
            ..Default::default()
        };
        unsafe { GetGUIThreadInfo(tid, &mut gti) }.ok()?;
        Some(GuiThreadInfo {
            active: to_handle(gti.hwndActive),
            focus: to_handle(gti.hwndFocus),
            caret: to_handle(gti.hwndCaret),
            caret_rect: to_rect(gti.rcCaret),
        })
    }

    fn window_rect(&self, window: WindowHandle) -> Option<ScreenRect> {
        let mut r = RECT::default();
        unsafe { GetWindowRect(to_hwnd(window), &mut r) }.ok()?;
        Some(to_rect(r))
    }

    fn client_to_screen(&self, window: WindowHandle, point: ScreenPoint) -> Option<ScreenPoint> {
        let mut p = POINT {
            x: point.x,
            y: point.y,
        };
        if unsafe { ClientToScreen(to_hwnd(window), &mut p) }.as_bool() {
            Some(ScreenPoint::new(p.x, p.y))
        } else {
            None
        }
    }

    fn accessible_caret_location(&self, window: WindowHandle) -> Option<ScreenRect> {
        unsafe {
            let mut acc: Option<IAccessible> = None;
            if let Err(e) = AccessibleObjectFromWindow(
                to_hwnd(window),
                OBJID_CARET.0 as u32,
                &IAccessible::IID,
                &mut acc as *mut _ as *mut *mut c_void,
            ) {
                debug!("AccessibleObjectFromWindow failed: {e}");
                return None;
            }
            let acc = acc?;

            let (mut left, mut top, mut width, mut height) = (0i32, 0i32, 0i32, 0i32);
            // CHILDID_SELF
            let child = VARIANT::from(0i32);
            acc.accLocation(&mut left, &mut top, &mut width, &mut height, &child)
                .ok()?;
            Some(ScreenRect::from_origin_size(left, top, width, height))
        }
    }

    fn focused_caret_range(&self) -> Option<UiaCaretRange> {
        automation::focused_caret_range(self.automation.as_ref()?)
    }

    fn cursor_position(&self) -> Option<ScreenPoint> {
        let mut p = POINT::default();
        unsafe { GetCursorPos(&mut p) }.ok()?;
        Some(ScreenPoint::new(p.x, p.y))
    }
}

fn monitor_work_area(point: POINT, primary: bool) -> Option<ScreenRect> {
    unsafe {
        let flags = if primary {
            MONITOR_DEFAULTTOPRIMARY
        } else {
            MONITOR_DEFAULTTONULL
        };
        let monitor = MonitorFromPoint(point, flags);
        if monitor.is_invalid() {
            return None;
        }
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if GetMonitorInfoW(monitor, &mut info).as_bool() {
            Some(to_rect(info.rcWork))
        } else {
            None
        }
    }
}

impl Monitors for Win32Platform {
    fn work_area_at(&self, point: ScreenPoint) -> Option<ScreenRect> {
        monitor_work_area(
            POINT {
                x: point.x,
                y: point.y,
            },
            false,
        )
    }

    fn primary_work_area(&self) -> Option<ScreenRect> {
        // The primary monitor always contains the origin.
        monitor_work_area(POINT { x: 0, y: 0 }, true).or_else(|| {
            let cursor = self.cursor_position()?;
            self.work_area_at(cursor)
        })
    }
}
