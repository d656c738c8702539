//! System tray (notification area) icon for Windows.
//!
//! The only way to quit: right-click the icon and choose Exit.

use std::cell::RefCell;

use windows::core::w;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_INFO, NIM_ADD, NIM_DELETE,
    NIM_MODIFY, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, HMENU, IDI_APPLICATION, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN,
    TPM_RIGHTBUTTON, WM_USER,
};

// Custom message for tray icon events
pub const WM_TRAYICON: u32 = WM_USER + 1;

// Menu item IDs
pub const MENU_EXIT: u32 = 1001;

// Tray icon ID
const TRAY_ICON_ID: u32 = 1;

const APP_NAME: &str = "LangLayoutBeacon";

thread_local! {
    static TRAY_HWND: RefCell<Option<HWND>> = const { RefCell::new(None) };
    static TRAY_MENU: RefCell<Option<HMENU>> = const { RefCell::new(None) };
}

/// Copy `text` into a fixed, null-terminated UTF-16 buffer.
fn fill_wide(dst: &mut [u16], text: &str) {
    let limit = dst.len().saturating_sub(1);
    for (slot, c) in dst.iter_mut().zip(text.encode_utf16().take(limit)) {
        *slot = c;
    }
}

/// Install the system tray icon with its Exit menu.
pub fn install_tray_icon(hwnd: HWND) {
    unsafe {
        TRAY_HWND.with(|h| *h.borrow_mut() = Some(hwnd));

        let hicon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();

        let mut nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_TRAYICON,
            hIcon: hicon,
            ..Default::default()
        };
        fill_wide(&mut nid.szTip, APP_NAME);

        let _ = Shell_NotifyIconW(NIM_ADD, &nid);

        let menu = CreatePopupMenu().unwrap_or_default();
        let _ = AppendMenuW(menu, MF_STRING, MENU_EXIT as usize, w!("Exit"));

        TRAY_MENU.with(|m| *m.borrow_mut() = Some(menu));
    }
}

/// One-off balloon telling the user the app is running.
pub fn show_running_balloon() {
    TRAY_HWND.with(|h| {
        if let Some(hwnd) = *h.borrow() {
            unsafe {
                let mut nid = NOTIFYICONDATAW {
                    cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                    hWnd: hwnd,
                    uID: TRAY_ICON_ID,
                    uFlags: NIF_INFO,
                    dwInfoFlags: NIIF_INFO,
                    ..Default::default()
                };
                fill_wide(&mut nid.szInfoTitle, APP_NAME);
                fill_wide(&mut nid.szInfo, "Running. Right-click tray icon to exit.");

                let _ = Shell_NotifyIconW(NIM_MODIFY, &nid);
            }
        }
    });
}

/// Remove the tray icon.
pub fn remove_tray_icon() {
    TRAY_HWND.with(|h| {
        if let Some(hwnd) = h.borrow_mut().take() {
            unsafe {
                let nid = NOTIFYICONDATAW {
                    cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                    hWnd: hwnd,
                    uID: TRAY_ICON_ID,
                    ..Default::default()
                };
                let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
            }
        }
    });

    TRAY_MENU.with(|m| {
        if let Some(menu) = m.borrow_mut().take() {
            unsafe {
                let _ = DestroyMenu(menu);
            }
        }
    });
}

/// Show the context menu at the cursor position.
pub fn show_tray_menu(hwnd: HWND) {
    TRAY_MENU.with(|m| {
        if let Some(menu) = *m.borrow() {
            unsafe {
                let mut pt = POINT::default();
                let _ = GetCursorPos(&mut pt);

                // Required for menu to close when clicking outside
                let _ = SetForegroundWindow(hwnd);

                let _ = TrackPopupMenu(
                    menu,
                    TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON,
                    pt.x,
                    pt.y,
                    None, // nReserved - must be None/0
                    hwnd,
                    None,
                );
            }
        }
    });
}
