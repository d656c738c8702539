//! Strongly-typed UI Automation caret lookup.
//!
//! Each COM step maps to an `Option`/`bool` so the escalation in the
//! resolver never has to unwind through errors.

use std::ffi::c_void;

use tracing::debug;
use windows::core::{Interface, BOOL};
use windows::Win32::System::Com::{
    CoCreateInstance, SAFEARRAY, CLSCTX_INPROC_SERVER,
};
use windows::Win32::System::Ole::{
    SafeArrayAccessData, SafeArrayDestroy, SafeArrayGetLBound, SafeArrayGetUBound,
    SafeArrayUnaccessData,
};
use windows::Win32::UI::Accessibility::{
    CUIAutomation, CUIAutomation8, IUIAutomation, IUIAutomationTextPattern2,
    IUIAutomationTextRange, TextPatternRangeEndpoint_End, TextUnit_Character,
    UIA_TextPattern2Id,
};

use crate::model::RectF;
use crate::platform::CaretRange;

/// `CUIAutomation8`, falling back to `CUIAutomation` on older systems.
pub fn create_client() -> Option<IUIAutomation> {
    unsafe {
        CoCreateInstance::<_, IUIAutomation>(&CUIAutomation8, None, CLSCTX_INPROC_SERVER)
            .or_else(|_| CoCreateInstance(&CUIAutomation, None, CLSCTX_INPROC_SERVER))
            .inspect_err(|e| debug!("CoCreateInstance(CUIAutomation) failed: {e}"))
            .ok()
    }
}

/// Caret range of the focused element via `TextPattern2`.
pub fn focused_caret_range(automation: &IUIAutomation) -> Option<UiaCaretRange> {
    unsafe {
        let focused = automation.GetFocusedElement().ok()?;
        let pattern = focused
            .GetCurrentPattern(UIA_TextPattern2Id)
            .ok()?
            .cast::<IUIAutomationTextPattern2>()
            .ok()?;
        let mut is_active = BOOL::default();
        let range = pattern.GetCaretRange(&mut is_active).ok()?;
        Some(UiaCaretRange { range })
    }
}

/// A live `IUIAutomationTextRange`.
pub struct UiaCaretRange {
    range: IUIAutomationTextRange,
}

impl CaretRange for UiaCaretRange {
    fn bounding_rects(&self) -> Option<Vec<RectF>> {
        unsafe {
            let psa = self.range.GetBoundingRectangles().ok()?;
            let values = read_doubles(psa);
            let _ = SafeArrayDestroy(psa);
            let rects: Vec<RectF> = values?
                .chunks_exact(4)
                .map(|c| RectF::new(c[0], c[1], c[2], c[3]))
                .collect();
            (!rects.is_empty()).then_some(rects)
        }
    }

    fn duplicate(&self) -> Option<Self> {
        let range = unsafe { self.range.Clone() }.ok()?;
        Some(Self { range })
    }

    fn expand_to_character(&mut self) -> bool {
        unsafe { self.range.ExpandToEnclosingUnit(TextUnit_Character) }.is_ok()
    }

    fn move_end_by_character(&mut self) -> bool {
        unsafe {
            self.range
                .MoveEndpointByUnit(TextPatternRangeEndpoint_End, TextUnit_Character, 1)
        }
        .is_ok()
    }
}

/// Copy a one-dimensional SAFEARRAY of doubles. Does not free `psa`.
unsafe fn read_doubles(psa: *mut SAFEARRAY) -> Option<Vec<f64>> {
    if psa.is_null() {
        return None;
    }
    let lower = SafeArrayGetLBound(psa, 1).ok()?;
    let upper = SafeArrayGetUBound(psa, 1).ok()?;
    let len = (upper - lower + 1).max(0) as usize;
    if len == 0 {
        return Some(Vec::new());
    }

    let mut data: *mut c_void = std::ptr::null_mut();
    SafeArrayAccessData(psa, &mut data).ok()?;
    let values = std::slice::from_raw_parts(data as *const f64, len).to_vec();
    let _ = SafeArrayUnaccessData(psa);
    Some(values)
}
