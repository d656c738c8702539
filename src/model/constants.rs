//! Configuration constants and default values.
//!
//! This module contains all application constants including settings
//! defaults, validation limits, anchor tolerances and timer intervals.

// === Settings Defaults ===

/// Default pulse / auto-hide duration in milliseconds.
pub const DEFAULT_BANNER_DURATION_MS: i64 = 520;

/// Default gap between the anchor and the overlay in pixels.
pub const DEFAULT_BANNER_OFFSET_PX: i32 = 10;

/// Persistent (always visible) presentation is on by default.
pub const DEFAULT_PERSISTENT_ENABLED: bool = true;

/// Default resting scale in persistent mode.
pub const DEFAULT_PERSISTENT_SCALE: f64 = 0.5;

/// Default scale reached on a layout switch.
pub const DEFAULT_SWITCH_SCALE: f64 = 1.0;

/// Default font size in points at scale 1.0.
pub const DEFAULT_BASE_FONT_SIZE: f64 = 10.0;

/// Default pointer offset used by the mouse fallback (x).
pub const DEFAULT_MOUSE_OFFSET_X: i32 = 14;

/// Default pointer offset used by the mouse fallback (y).
pub const DEFAULT_MOUSE_OFFSET_Y: i32 = 16;

// === Validation Limits ===

/// Minimum banner duration in milliseconds.
pub const MIN_BANNER_DURATION_MS: i64 = 300;

/// Maximum banner duration in milliseconds.
pub const MAX_BANNER_DURATION_MS: i64 = 1200;

/// Minimum banner offset in pixels.
pub const MIN_BANNER_OFFSET_PX: i32 = 0;

/// Maximum banner offset in pixels.
pub const MAX_BANNER_OFFSET_PX: i32 = 80;

/// Minimum persistent scale.
pub const MIN_PERSISTENT_SCALE: f64 = 0.2;

/// Maximum persistent scale.
pub const MAX_PERSISTENT_SCALE: f64 = 1.0;

/// Maximum switch scale. The minimum is the persistent scale.
pub const MAX_SWITCH_SCALE: f64 = 2.2;

/// Minimum base font size in points.
pub const MIN_FONT_SIZE: f64 = 6.0;

/// Maximum base font size in points.
pub const MAX_FONT_SIZE: f64 = 28.0;

/// Minimum mouse fallback offset in pixels (both axes).
pub const MIN_MOUSE_OFFSET: i32 = 0;

/// Maximum mouse fallback offset in pixels (both axes).
pub const MAX_MOUSE_OFFSET: i32 = 120;

// === Anchor Tolerances ===

/// Containment margin around the focused control (native caret only).
pub const FOCUSED_CONTROL_TOLERANCE_PX: i32 = 12;

/// Containment margin around the foreground window (accessibility / automation).
pub const FOREGROUND_WINDOW_TOLERANCE_PX: i32 = 24;

/// Loose containment margin applied to every validated candidate.
pub const SECONDARY_WINDOW_TOLERANCE_PX: i32 = 48;

/// Candidates this close to the foreground window's top-left are stale.
pub const WINDOW_ORIGIN_TOLERANCE_PX: i32 = 24;

// === Overlay Geometry ===

/// Horizontal text padding at scale 1.0.
pub const TEXT_PADDING_PX: f64 = 18.0;

/// Overlay height at scale 1.0.
pub const OVERLAY_HEIGHT_PX: f64 = 30.0;

/// Corner radius at scale 1.0.
pub const CORNER_RADIUS_PX: f64 = 8.0;

/// Smallest overlay width.
pub const MIN_OVERLAY_WIDTH: i32 = 28;

/// Smallest overlay height.
pub const MIN_OVERLAY_HEIGHT: i32 = 14;

/// Smallest corner radius.
pub const MIN_CORNER_RADIUS: i32 = 3;

/// Shown when the layout has no usable name.
pub const PLACEHOLDER_LANGUAGE: &str = "--";

/// Language shown before the first layout lookup.
pub const INITIAL_LANGUAGE: &str = "EN";

// === Timers ===

/// Layout / anchor poll interval.
pub const POLL_INTERVAL_MS: u32 = 70;

/// Pulse animation frame interval (~60 FPS).
pub const PULSE_INTERVAL_MS: u32 = 16;
