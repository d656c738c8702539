//! Windows entry point: overlay window, timers and message loop.
//!
//! Three timers drive the core on the UI thread: the poll tick, the pulse
//! animation (only while a pulse runs) and the legacy auto-hide timer.

pub mod state;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, D2D1_FACTORY_TYPE_SINGLE_THREADED,
};
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory, DWRITE_FACTORY_TYPE_SHARED,
};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, KillTimer,
    LoadCursorW, PostQuitMessage, RegisterClassW, SetTimer, TranslateMessage, IDC_ARROW, MSG,
    WM_COMMAND, WM_DESTROY, WM_RBUTTONUP, WM_TIMER, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};

use self::state::{take_frame, with_state, WindowsRuntimeState, STATE};
use crate::logging;
use crate::model::constants::{POLL_INTERVAL_MS, PULSE_INTERVAL_MS};
use crate::overlay::{PulseTick, SwitchOutcome};
use crate::platform::windows::query::Win32Platform;
use crate::model::SettingsSource;
use crate::platform::windows::storage::load_settings;
use crate::platform::windows::ui::overlay::{
    render_overlay, DWriteMeasure, D2D_FACTORY, DWRITE_FACTORY,
};
use crate::platform::windows::ui::tray::{self, MENU_EXIT, WM_TRAYICON};
use crate::platform::WindowHandle;
use crate::poll::PollLoop;

// Timer IDs
pub const TIMER_POLL: usize = 1;
pub const TIMER_PULSE: usize = 2;
pub const TIMER_HIDE: usize = 3;

/// Run until the user chooses Exit from the tray menu.
pub fn run() -> Result<()> {
    let (settings, source) = load_settings();
    logging::init(settings.debug_logging);
    info!("Starting LangLayoutBeacon");
    match source {
        SettingsSource::File(path) => info!("Settings loaded from {}", path.display()),
        SettingsSource::Missing(path) => {
            info!("No settings at {}; using defaults", path.display())
        }
        SettingsSource::Invalid(e) => warn!("Using default settings: {}", e),
    }

    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED)
            .ok()
            .context("COM initialisation failed")?;
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);

        let result = run_app(&settings);

        STATE.with(|s| *s.borrow_mut() = None);
        DWRITE_FACTORY.with(|f| *f.borrow_mut() = None);
        D2D_FACTORY.with(|f| *f.borrow_mut() = None);
        CoUninitialize();

        result
    }
}

unsafe fn run_app(settings: &crate::model::Settings) -> Result<()> {
    let factory: ID2D1Factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)
        .context("Direct2D factory")?;
    D2D_FACTORY.with(|f| *f.borrow_mut() = Some(factory));

    let dwrite: IDWriteFactory =
        DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED).context("DirectWrite factory")?;
    DWRITE_FACTORY.with(|f| *f.borrow_mut() = Some(dwrite.clone()));

    let instance = GetModuleHandleW(None)?;
    let class_name = w!("LangLayoutBeaconOverlay");

    let wc = WNDCLASSW {
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        hCursor: LoadCursorW(None, IDC_ARROW)?,
        lpszClassName: class_name,
        ..Default::default()
    };
    RegisterClassW(&wc);

    // Layered, click-through, topmost, never activated
    let ex_style =
        WS_EX_LAYERED | WS_EX_TRANSPARENT | WS_EX_TOPMOST | WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW;

    let hwnd = CreateWindowExW(
        ex_style,
        class_name,
        w!("LangLayoutBeacon"),
        WS_POPUP,
        0,
        0,
        1,
        1,
        None,
        None,
        Some(instance.into()),
        None,
    )
    .context("overlay window")?;

    let mut beacon = PollLoop::new(Win32Platform::new(), settings, DWriteMeasure::new(dwrite));
    beacon.ignore_window(WindowHandle(hwnd.0 as isize));
    STATE.with(|s| {
        *s.borrow_mut() = Some(WindowsRuntimeState {
            hwnd,
            beacon,
            last_rendered: None,
        })
    });

    tray::install_tray_icon(hwnd);
    tray::show_running_balloon();

    SetTimer(Some(hwnd), TIMER_POLL, POLL_INTERVAL_MS, None);
    render_if_changed();

    // Message loop
    let mut msg = MSG::default();
    while GetMessageW(&mut msg, None, 0, 0).as_bool() {
        let _ = TranslateMessage(&msg);
        DispatchMessageW(&msg);
    }

    let _ = KillTimer(Some(hwnd), TIMER_POLL);
    let _ = KillTimer(Some(hwnd), TIMER_PULSE);
    let _ = KillTimer(Some(hwnd), TIMER_HIDE);
    tray::remove_tray_icon();

    info!("Exiting");
    Ok(())
}

fn render_if_changed() {
    let frame = with_state(|state| take_frame(state).map(|f| (state.hwnd, f))).flatten();
    // Rendering happens outside the state borrow.
    if let Some((hwnd, frame)) = frame {
        render_overlay(hwnd, &frame);
    }
}

fn on_poll_timer(hwnd: HWND) {
    let report = with_state(|state| state.beacon.tick(Instant::now())).flatten();
    match report.and_then(|r| r.switch) {
        Some(SwitchOutcome::PulseStarted) => unsafe {
            SetTimer(Some(hwnd), TIMER_PULSE, PULSE_INTERVAL_MS, None);
        },
        Some(SwitchOutcome::AutoHideRestarted(duration)) => unsafe {
            // Re-arming an existing timer id restarts it
            let ms = duration.as_millis().min(u32::MAX as u128) as u32;
            SetTimer(Some(hwnd), TIMER_HIDE, ms, None);
        },
        None => {}
    }
}

fn on_pulse_timer(hwnd: HWND) {
    let tick = with_state(|state| state.beacon.tick_pulse(Instant::now()));
    if !matches!(tick, Some(PulseTick::Running)) {
        unsafe {
            let _ = KillTimer(Some(hwnd), TIMER_PULSE);
        }
    }
}

fn on_hide_timer(hwnd: HWND) {
    unsafe {
        let _ = KillTimer(Some(hwnd), TIMER_HIDE);
    }
    with_state(|state| state.beacon.on_auto_hide_timer());
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_TIMER => {
                match wparam.0 {
                    TIMER_POLL => on_poll_timer(hwnd),
                    TIMER_PULSE => on_pulse_timer(hwnd),
                    TIMER_HIDE => on_hide_timer(hwnd),
                    _ => {}
                }
                render_if_changed();
                LRESULT(0)
            }

            // System tray icon messages
            msg if msg == WM_TRAYICON => {
                if lparam.0 as u32 == WM_RBUTTONUP {
                    tray::show_tray_menu(hwnd);
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                if (wparam.0 & 0xFFFF) as u32 == MENU_EXIT {
                    if let Err(e) = DestroyWindow(hwnd) {
                        warn!("DestroyWindow failed: {e}");
                        PostQuitMessage(0);
                    }
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
