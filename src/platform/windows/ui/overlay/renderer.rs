//! Direct2D overlay rendering.
//!
//! Draws the rounded language badge into an ARGB bitmap and applies it with
//! `UpdateLayeredWindow`, which also moves and resizes the window to the
//! geometry computed by the presenter.

use std::cell::RefCell;

use windows::core::w;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, RECT, SIZE};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F,
};
use windows::Win32::Graphics::Direct2D::{
    ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget, D2D1_ANTIALIAS_MODE_PER_PRIMITIVE,
    D2D1_DRAW_TEXT_OPTIONS_NONE, D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT,
    D2D1_RENDER_TARGET_USAGE_NONE, D2D1_ROUNDED_RECT,
};
use windows::Win32::Graphics::DirectWrite::{
    IDWriteFactory, IDWriteFontCollection, IDWriteTextFormat, DWRITE_FONT_STRETCH_NORMAL,
    DWRITE_FONT_STYLE_NORMAL, DWRITE_FONT_WEIGHT_BOLD, DWRITE_MEASURING_MODE_NATURAL,
    DWRITE_PARAGRAPH_ALIGNMENT_CENTER, DWRITE_TEXT_ALIGNMENT_CENTER, DWRITE_TEXT_METRICS,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    ShowWindow, UpdateLayeredWindow, SW_HIDE, SW_SHOWNOACTIVATE, ULW_ALPHA,
};

use crate::overlay::{OverlayState, TextMeasure};

thread_local! {
    pub static D2D_FACTORY: RefCell<Option<ID2D1Factory>> = const { RefCell::new(None) };
    pub static DWRITE_FACTORY: RefCell<Option<IDWriteFactory>> = const { RefCell::new(None) };
}

/// Background fill opacity.
const FILL_OPACITY: f32 = 0.68;

/// Border alpha (160 / 255).
const BORDER_ALPHA: f32 = 160.0 / 255.0;

/// Points to DIPs (96 DPI).
fn points_to_dips(points: f64) -> f32 {
    (points * 96.0 / 72.0) as f32
}

/// Bold "Segoe UI", centred in its layout box.
pub unsafe fn create_text_format(
    factory: &IDWriteFactory,
    font_size: f64,
) -> Option<IDWriteTextFormat> {
    let format = factory
        .CreateTextFormat(
            w!("Segoe UI"),
            None::<&IDWriteFontCollection>,
            DWRITE_FONT_WEIGHT_BOLD,
            DWRITE_FONT_STYLE_NORMAL,
            DWRITE_FONT_STRETCH_NORMAL,
            points_to_dips(font_size),
            w!("en-us"),
        )
        .ok()?;
    let _ = format.SetTextAlignment(DWRITE_TEXT_ALIGNMENT_CENTER);
    let _ = format.SetParagraphAlignment(DWRITE_PARAGRAPH_ALIGNMENT_CENTER);
    Some(format)
}

/// DirectWrite text measurement for the presenter's geometry.
pub struct DWriteMeasure {
    factory: IDWriteFactory,
}

impl DWriteMeasure {
    pub fn new(factory: IDWriteFactory) -> Self {
        Self { factory }
    }
}

impl TextMeasure for DWriteMeasure {
    fn measure(&self, text: &str, font_size: f64) -> (i32, i32) {
        let wide: Vec<u16> = text.encode_utf16().collect();
        let measured = unsafe {
            create_text_format(&self.factory, font_size).and_then(|format| {
                let layout = self
                    .factory
                    .CreateTextLayout(&wide, &format, f32::MAX, f32::MAX)
                    .ok()?;
                let mut metrics = DWRITE_TEXT_METRICS::default();
                layout.GetMetrics(&mut metrics).ok()?;
                Some((
                    metrics.widthIncludingTrailingWhitespace.ceil() as i32,
                    metrics.height.ceil() as i32,
                ))
            })
        };
        // Rough average glyph box if DirectWrite is unavailable
        measured.unwrap_or_else(|| {
            let px = points_to_dips(font_size);
            ((wide.len() as f32 * px * 0.65).ceil() as i32, px.ceil() as i32)
        })
    }
}

/// Render `state` into the overlay window, or hide it.
pub fn render_overlay(hwnd: HWND, state: &OverlayState) {
    unsafe {
        if !state.visible {
            let _ = ShowWindow(hwnd, SW_HIDE);
            return;
        }

        D2D_FACTORY.with(|d2d_f| {
            DWRITE_FACTORY.with(|dw_f| {
                if let (Some(d2d), Some(dwrite)) = (d2d_f.borrow().as_ref(), dw_f.borrow().as_ref())
                {
                    update_layered_window_d2d(hwnd, state, d2d, dwrite);
                }
            });
        });

        let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
    }
}

/// Draw using Direct2D and apply with UpdateLayeredWindow.
unsafe fn update_layered_window_d2d(
    hwnd: HWND,
    state: &OverlayState,
    factory: &ID2D1Factory,
    dwrite: &IDWriteFactory,
) {
    let g = state.geometry;
    let (width, height) = (g.width.max(1), g.height.max(1));

    // Create a compatible DC and ARGB bitmap
    let screen_dc = GetDC(None);
    let mem_dc = CreateCompatibleDC(Some(screen_dc));

    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
    let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
        Ok(bitmap) if !bits.is_null() => bitmap,
        _ => {
            ReleaseDC(None, screen_dc);
            let _ = DeleteDC(mem_dc);
            return;
        }
    };
    let old_bitmap = SelectObject(mem_dc, bitmap.into());

    let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
        r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        usage: D2D1_RENDER_TARGET_USAGE_NONE,
        minLevel: Default::default(),
    };

    let render_target: Result<ID2D1DCRenderTarget, _> = factory.CreateDCRenderTarget(&rt_props);

    if let Ok(dc_rt) = render_target {
        let rect = RECT {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };

        if dc_rt.BindDC(mem_dc, &rect).is_ok() {
            let rt: ID2D1RenderTarget = dc_rt.into();

            rt.BeginDraw();
            rt.Clear(Some(&D2D1_COLOR_F {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            }));
            rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);

            let radius = g.corner_radius as f32;
            let badge = D2D1_ROUNDED_RECT {
                rect: D2D_RECT_F {
                    left: 0.5,
                    top: 0.5,
                    right: width as f32 - 0.5,
                    bottom: height as f32 - 0.5,
                },
                radiusX: radius,
                radiusY: radius,
            };

            let fill = D2D1_COLOR_F {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: FILL_OPACITY,
            };
            if let Ok(brush) = rt.CreateSolidColorBrush(&fill, None) {
                rt.FillRoundedRectangle(&badge, &brush);
            }

            let border = D2D1_COLOR_F {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: BORDER_ALPHA,
            };
            if let Ok(brush) = rt.CreateSolidColorBrush(&border, None) {
                rt.DrawRoundedRectangle(&badge, &brush, 1.0, None);
            }

            let text_color = D2D1_COLOR_F {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 1.0,
            };
            if let (Some(format), Ok(brush)) = (
                create_text_format(dwrite, g.font_size),
                rt.CreateSolidColorBrush(&text_color, None),
            ) {
                let text: Vec<u16> = state.language.as_str().encode_utf16().collect();
                let layout = D2D_RECT_F {
                    left: 0.0,
                    top: 0.0,
                    right: width as f32,
                    bottom: height as f32,
                };
                rt.DrawText(
                    &text,
                    &format,
                    &layout,
                    &brush,
                    D2D1_DRAW_TEXT_OPTIONS_NONE,
                    DWRITE_MEASURING_MODE_NATURAL,
                );
            }

            let _ = rt.EndDraw(None, None);
        }
    }

    // Apply to window; this also moves and resizes it
    let pt_src = POINT { x: 0, y: 0 };
    let size = SIZE {
        cx: width,
        cy: height,
    };
    let pt_dst = POINT { x: g.x, y: g.y };

    let blend = BLENDFUNCTION {
        BlendOp: 0,
        BlendFlags: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: 1,
    };

    let _ = UpdateLayeredWindow(
        hwnd,
        Some(screen_dc),
        Some(&pt_dst),
        Some(&size),
        Some(mem_dc),
        Some(&pt_src),
        COLORREF(0),
        Some(&blend),
        ULW_ALPHA,
    );

    // Cleanup
    SelectObject(mem_dc, old_bitmap);
    let _ = DeleteObject(bitmap.into());
    let _ = DeleteDC(mem_dc);
    ReleaseDC(None, screen_dc);
}
