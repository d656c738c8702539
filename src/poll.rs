//! The fixed-interval driver: layout change detection, anchor resolution
//! and presentation, once per tick.

use std::time::Instant;

use tracing::debug;

use crate::anchor::{AnchorCandidate, AnchorPipeline};
use crate::layout::{current_layout, short_name};
use crate::model::Settings;
use crate::overlay::{Presenter, PulseTick, SwitchOutcome, TextMeasure};
use crate::platform::{LayoutId, Monitors, PlatformQuery, WindowHandle};

/// What happened during one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub layout: LayoutId,
    /// Set when the layout differs from the previous tick.
    pub switch: Option<SwitchOutcome>,
    /// `None` when the overlay was centred instead.
    pub anchor: Option<AnchorCandidate>,
}

/// Owns the platform, the resolver chain and the presenter.
pub struct PollLoop<P, M>
where
    P: PlatformQuery + Monitors,
    M: TextMeasure,
{
    platform: P,
    pipeline: AnchorPipeline,
    presenter: Presenter<M>,
    last_layout: LayoutId,
    own_window: Option<WindowHandle>,
}

impl<P, M> PollLoop<P, M>
where
    P: PlatformQuery + Monitors,
    M: TextMeasure,
{
    /// Reads the current layout so the first tick does not count as a switch.
    pub fn new(platform: P, settings: &Settings, measure: M) -> Self {
        let mut presenter = Presenter::new(settings, measure);
        let last_layout = current_layout(&platform);
        if !last_layout.is_none() {
            presenter.set_language(short_name(&platform, last_layout).as_str());
        }
        Self {
            platform,
            pipeline: AnchorPipeline::from_settings(settings),
            presenter,
            last_layout,
            own_window: None,
        }
    }

    pub fn presenter(&self) -> &Presenter<M> {
        &self.presenter
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn pipeline(&self) -> &AnchorPipeline {
        &self.pipeline
    }

    pub fn last_layout(&self) -> LayoutId {
        self.last_layout
    }

    /// Skip ticks while `window` is in the foreground (the tray menu makes
    /// the overlay window foreground, and its layout is not the user's).
    pub fn ignore_window(&mut self, window: WindowHandle) {
        self.own_window = Some(window);
    }

    /// One poll tick. Returns `None` when there is no foreground window or
    /// the foreground window is our own.
    pub fn tick(&mut self, now: Instant) -> Option<TickReport> {
        if self.own_window.is_some() && self.platform.foreground_window() == self.own_window {
            return None;
        }
        let current = current_layout(&self.platform);
        if current.is_none() {
            return None;
        }

        let mut switch = None;
        if current != self.last_layout {
            self.last_layout = current;
            let code = short_name(&self.platform, current);
            switch = Some(
                self.presenter
                    .on_layout_switched(code.as_str(), now, &self.platform),
            );
        }

        let anchor = self.pipeline.resolve(&self.platform);
        match anchor {
            Some(candidate) => {
                debug!(
                    "Anchor ({}, {}) from {}",
                    candidate.point.x, candidate.point.y, candidate.source
                );
                self.presenter.update_anchor(candidate.point, &self.platform);
            }
            None => self.presenter.show_centered_if_needed(&self.platform),
        }

        Some(TickReport {
            layout: current,
            switch,
            anchor,
        })
    }

    /// One pulse animation frame.
    pub fn tick_pulse(&mut self, now: Instant) -> PulseTick {
        self.presenter.tick_pulse(now, &self.platform)
    }

    pub fn on_auto_hide_timer(&mut self) {
        self.presenter.on_auto_hide_timer();
    }
}
