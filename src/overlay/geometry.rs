//! Overlay box size and placement.

use crate::clamp;
use crate::model::constants::*;
use crate::model::{ScreenPoint, ScreenRect};

/// Measures rendered text. Implemented with DirectWrite on Windows.
pub trait TextMeasure {
    /// Width and height in pixels of `text` at `font_size` points (bold).
    fn measure(&self, text: &str, font_size: f64) -> (i32, i32);
}

/// On-screen box the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub corner_radius: i32,
    /// Font size in points.
    pub font_size: f64,
}

impl OverlayGeometry {
    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    pub fn bounds(&self) -> ScreenRect {
        ScreenRect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    /// Recompute size, radius and font for `text` at `scale`; keeps the origin.
    pub fn resized<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        text: &str,
        base_font_size: f64,
        scale: f64,
    ) -> Self {
        let font_size = scaled_font_size(base_font_size, scale);
        let (text_width, _) = measure.measure(text, font_size);
        let padding = (TEXT_PADDING_PX * scale).round() as i32;
        Self {
            x: self.x,
            y: self.y,
            width: (text_width + padding).max(MIN_OVERLAY_WIDTH),
            height: ((OVERLAY_HEIGHT_PX * scale).round() as i32).max(MIN_OVERLAY_HEIGHT),
            corner_radius: ((CORNER_RADIUS_PX * scale).round() as i32).max(MIN_CORNER_RADIUS),
            font_size,
        }
    }
}

/// Font size grows linearly with scale, kept within [6, 28] points.
pub fn scaled_font_size(base_font_size: f64, scale: f64) -> f64 {
    clamp(base_font_size * scale, MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Above-right of `anchor` by `offset`, kept inside `area` when known.
pub fn place_near(
    anchor: ScreenPoint,
    width: i32,
    height: i32,
    offset: i32,
    area: Option<ScreenRect>,
) -> ScreenPoint {
    let x = anchor.x + offset;
    let y = anchor.y - height - offset;
    match area {
        Some(a) => ScreenPoint::new(
            x.min(a.right - width).max(a.left),
            y.min(a.bottom - height).max(a.top),
        ),
        None => ScreenPoint::new(x, y),
    }
}

/// Centre of `area`.
pub fn center_in(width: i32, height: i32, area: &ScreenRect) -> ScreenPoint {
    ScreenPoint::new(
        area.left + (area.width() - width) / 2,
        area.top + (area.height() - height) / 2,
    )
}
