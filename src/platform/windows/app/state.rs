//! Windows runtime state management.
//!
//! Contains the application state struct and thread-local storage.

use std::cell::RefCell;

use windows::Win32::Foundation::HWND;

use crate::overlay::OverlayState;
use crate::platform::windows::query::Win32Platform;
use crate::platform::windows::ui::overlay::DWriteMeasure;
use crate::poll::PollLoop;

/// Everything the UI thread owns.
///
/// All mutation happens from `wndproc` on the single UI thread, so a
/// `RefCell` is all the synchronisation needed.
pub struct WindowsRuntimeState {
    pub hwnd: HWND,
    pub beacon: PollLoop<Win32Platform, DWriteMeasure>,
    /// Last state handed to the renderer, to skip identical frames.
    pub last_rendered: Option<OverlayState>,
}

thread_local! {
    /// Global application state for the Windows overlay.
    pub static STATE: RefCell<Option<WindowsRuntimeState>> = const { RefCell::new(None) };
}

/// Run `f` against the state if it has been installed.
pub fn with_state<R>(f: impl FnOnce(&mut WindowsRuntimeState) -> R) -> Option<R> {
    STATE.with(|s| s.borrow_mut().as_mut().map(f))
}

/// State to render, or `None` if it is unchanged since the last frame.
pub fn take_frame(state: &mut WindowsRuntimeState) -> Option<OverlayState> {
    let current = state.beacon.presenter().state();
    if state.last_rendered.as_ref() == Some(current) {
        return None;
    }
    let frame = current.clone();
    state.last_rendered = Some(frame.clone());
    Some(frame)
}
