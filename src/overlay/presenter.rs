//! Overlay presentation state machine.
//!
//! Turns layout switches, anchors and timer ticks into visibility, scale
//! and geometry. The host window only renders what [`OverlayState`] says.
//!
//! ```text
//!            switch (persistent)            pulse done
//! Hidden ───────────────────────► Pulsing ─────────────► Static
//!   ▲                                ▲                      │
//!   │ auto-hide (legacy)             └──── switch ──────────┘
//!   └──────────────── Static ◄── switch (legacy)
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::animation::{pulse_progress, pulse_scale};
use super::geometry::{center_in, place_near, OverlayGeometry, TextMeasure};
use crate::layout::LanguageCode;
use crate::model::constants::INITIAL_LANGUAGE;
use crate::model::{ScreenPoint, Settings};
use crate::platform::Monitors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    /// At rest, scale is the base or switch scale.
    VisibleStatic,
    /// Mid-pulse.
    VisiblePulsing,
}

/// What the host must schedule after a layout switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Run the pulse timer until [`PulseTick::Finished`].
    PulseStarted,
    /// (Re)arm the auto-hide timer for this long.
    AutoHideRestarted(Duration),
}

/// Result of one pulse frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseTick {
    /// No pulse in progress; the pulse timer can stop.
    Idle,
    Running,
    /// The pulse just ended; the pulse timer can stop.
    Finished,
}

/// Everything the host needs to render the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub current_scale: f64,
    pub base_scale: f64,
    pub switch_scale: f64,
    pub anchor: Option<ScreenPoint>,
    pub pulse_started_at: Option<Instant>,
    pub language: LanguageCode,
    pub geometry: OverlayGeometry,
    /// Legacy mode: when the banner hides.
    pub hide_deadline: Option<Instant>,
}

impl OverlayState {
    pub fn phase(&self) -> Phase {
        match (self.visible, self.pulse_started_at) {
            (false, _) => Phase::Hidden,
            (true, Some(_)) => Phase::VisiblePulsing,
            (true, None) => Phase::VisibleStatic,
        }
    }
}

/// Presentation options, already clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PresentationConfig {
    persistent: bool,
    duration: Duration,
    offset: i32,
    base_font_size: f64,
}

pub struct Presenter<M: TextMeasure> {
    config: PresentationConfig,
    state: OverlayState,
    measure: M,
}

impl<M: TextMeasure> Presenter<M> {
    pub fn new(settings: &Settings, measure: M) -> Self {
        let settings = settings.clone().validated();
        let base_scale = settings.base_scale();
        let switch_scale = settings.switch_scale();
        let persistent = settings.persistent_banner_enabled;
        let current_scale = if persistent { base_scale } else { switch_scale };

        let mut presenter = Self {
            config: PresentationConfig {
                persistent,
                duration: settings.banner_duration(),
                offset: settings.banner_offset(),
                base_font_size: settings.base_font_size,
            },
            state: OverlayState {
                visible: persistent,
                current_scale,
                base_scale,
                switch_scale,
                anchor: None,
                pulse_started_at: None,
                language: LanguageCode::from_display(INITIAL_LANGUAGE),
                geometry: OverlayGeometry::default(),
                hide_deadline: None,
            },
            measure,
        };
        presenter.apply_scale(current_scale);
        presenter
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_persistent(&self) -> bool {
        self.config.persistent
    }

    pub fn pulse_duration(&self) -> Duration {
        self.config.duration
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.state.hide_deadline
    }

    /// Replace the displayed code; blank text shows `--`.
    pub fn set_language(&mut self, code: &str) {
        self.state.language = LanguageCode::from_display(code);
        self.apply_scale(self.state.current_scale);
    }

    /// A new layout became active.
    pub fn on_layout_switched(
        &mut self,
        code: &str,
        now: Instant,
        monitors: &dyn Monitors,
    ) -> SwitchOutcome {
        self.set_language(code);
        info!("Layout switched to {}", self.state.language);

        if self.config.persistent {
            self.state.pulse_started_at = Some(now);
            self.state.visible = true;
            return SwitchOutcome::PulseStarted;
        }

        // Legacy mode: only a temporary switch banner.
        self.apply_scale(self.state.switch_scale);
        self.place_near_anchor_or_center(monitors);
        self.state.visible = true;
        self.state.hide_deadline = Some(now + self.config.duration);
        SwitchOutcome::AutoHideRestarted(self.config.duration)
    }

    /// Follow a freshly resolved anchor.
    pub fn update_anchor(&mut self, anchor: ScreenPoint, monitors: &dyn Monitors) {
        self.state.anchor = Some(anchor);
        self.place_near_anchor_or_center(monitors);
        if self.config.persistent {
            self.state.visible = true;
        }
    }

    /// No anchor this tick: forget the last one and centre on the primary
    /// monitor in persistent mode.
    pub fn show_centered_if_needed(&mut self, monitors: &dyn Monitors) {
        self.state.anchor = None;
        if !self.config.persistent {
            return;
        }
        self.state.visible = true;

        let Some(area) = monitors.primary_work_area() else {
            return;
        };
        let g = self.state.geometry;
        let origin = center_in(g.width, g.height, &area);
        self.state.geometry.x = origin.x;
        self.state.geometry.y = origin.y;
    }

    /// Advance the pulse animation.
    pub fn tick_pulse(&mut self, now: Instant, monitors: &dyn Monitors) -> PulseTick {
        let Some(started) = self.state.pulse_started_at else {
            return PulseTick::Idle;
        };
        let elapsed = now.saturating_duration_since(started);

        if elapsed >= self.config.duration {
            self.state.pulse_started_at = None;
            self.apply_scale(self.state.base_scale);
            self.place_near_anchor_or_center(monitors);
            debug!("Pulse finished");
            return PulseTick::Finished;
        }

        let t = pulse_progress(elapsed, self.config.duration);
        let scale = pulse_scale(self.state.base_scale, self.state.switch_scale, t);
        self.apply_scale(scale);
        self.place_near_anchor_or_center(monitors);
        PulseTick::Running
    }

    /// The auto-hide timer fired.
    pub fn on_auto_hide_timer(&mut self) {
        self.state.hide_deadline = None;
        self.state.visible = false;
    }

    fn apply_scale(&mut self, scale: f64) {
        self.state.current_scale = scale;
        self.state.geometry = self.state.geometry.resized(
            &self.measure,
            self.state.language.as_str(),
            self.config.base_font_size,
            scale,
        );
    }

    fn place_near_anchor_or_center(&mut self, monitors: &dyn Monitors) {
        let Some(anchor) = self.state.anchor else {
            self.show_centered_if_needed(monitors);
            return;
        };
        let g = self.state.geometry;
        let origin = place_near(
            anchor,
            g.width,
            g.height,
            self.config.offset,
            monitors.work_area_at(anchor),
        );
        self.state.geometry.x = origin.x;
        self.state.geometry.y = origin.y;
    }
}
