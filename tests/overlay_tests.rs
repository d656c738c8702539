//! Tests for the pulse curve, overlay geometry and the presenter.

mod support;

use std::time::{Duration, Instant};

use langbeacon::model::{ScreenPoint, ScreenRect};
use langbeacon::overlay::animation::{pulse_progress, pulse_scale};
use langbeacon::overlay::geometry::{center_in, place_near, scaled_font_size};
use langbeacon::overlay::{OverlayGeometry, Phase, Presenter, PulseTick, SwitchOutcome};
use langbeacon::Settings;
use support::{approx_eq, FakePlatform, FixedMeasure};

fn persistent() -> Presenter<FixedMeasure> {
    Presenter::new(&Settings::default(), FixedMeasure)
}

fn legacy() -> Presenter<FixedMeasure> {
    let settings = Settings {
        persistent_banner_enabled: false,
        ..Default::default()
    };
    Presenter::new(&settings, FixedMeasure)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// === Pulse Curve Tests ===

#[test]
fn pulse_starts_and_ends_at_base() {
    assert!(approx_eq(pulse_scale(0.5, 1.0, 0.0), 0.5));
    assert!(approx_eq(pulse_scale(0.5, 1.0, 1.0), 0.5));
    assert!(approx_eq(pulse_scale(0.5, 1.0, 1.5), 0.5));
}

#[test]
fn pulse_peaks_at_midpoint() {
    assert!(approx_eq(pulse_scale(0.5, 1.0, 0.5), 1.0));
}

#[test]
fn pulse_is_symmetric() {
    let rising = pulse_scale(0.5, 1.0, 0.25);
    let falling = pulse_scale(0.5, 1.0, 0.75);
    assert!(approx_eq(rising, falling));
    assert!(rising > 0.5 && rising < 1.0);
}

#[test]
fn pulse_progress_is_clamped() {
    assert!(approx_eq(pulse_progress(ms(260), ms(520)), 0.5));
    assert!(approx_eq(pulse_progress(ms(900), ms(520)), 1.0));
    assert!(approx_eq(pulse_progress(ms(100), Duration::ZERO), 1.0));
}

// === Geometry Tests ===

#[test]
fn font_size_scales_and_clamps() {
    assert!(approx_eq(scaled_font_size(10.0, 1.0), 10.0));
    assert!(approx_eq(scaled_font_size(10.0, 0.5), 6.0));
    assert!(approx_eq(scaled_font_size(20.0, 2.2), 28.0));
}

#[test]
fn resized_respects_minimums() {
    let g = OverlayGeometry::default().resized(&FixedMeasure, "EN", 10.0, 0.5);
    assert_eq!(g.width, 28);
    assert_eq!(g.height, 15);
    assert_eq!(g.corner_radius, 4);
    assert!(approx_eq(g.font_size, 6.0));

    let tiny = OverlayGeometry::default().resized(&FixedMeasure, "EN", 6.0, 0.2);
    assert_eq!(tiny.height, 14);
    assert_eq!(tiny.corner_radius, 3);
}

#[test]
fn resized_grows_with_text() {
    let g = OverlayGeometry::default().resized(&FixedMeasure, "0x0C1A", 10.0, 1.0);
    // 6 chars * 10pt + 18px padding
    assert_eq!(g.width, 78);
    assert_eq!(g.height, 30);
    assert_eq!(g.corner_radius, 8);
}

#[test]
fn place_near_goes_above_right() {
    let origin = place_near(ScreenPoint::new(500, 500), 28, 15, 10, None);
    assert_eq!(origin, ScreenPoint::new(510, 475));
}

#[test]
fn place_near_clamps_to_work_area() {
    let area = Some(ScreenRect::new(0, 0, 1920, 1040));
    let origin = place_near(ScreenPoint::new(1915, 5), 28, 15, 10, area);
    assert_eq!(origin, ScreenPoint::new(1892, 0));

    let origin = place_near(ScreenPoint::new(-50, 2000), 28, 15, 10, area);
    assert_eq!(origin, ScreenPoint::new(0, 1025));
}

#[test]
fn center_in_uses_area_origin() {
    let area = ScreenRect::new(1920, 0, 3840, 1040);
    assert_eq!(center_in(28, 15, &area), ScreenPoint::new(2866, 512));
}

// === Persistent Presenter Tests ===

#[test]
fn persistent_starts_visible_at_base_scale() {
    let p = persistent();
    assert!(p.is_persistent());
    assert_eq!(p.phase(), Phase::VisibleStatic);
    assert!(approx_eq(p.state().current_scale, 0.5));
    assert_eq!(p.state().language.as_str(), "EN");
}

#[test]
fn switch_starts_pulse_and_updates_language() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    let now = Instant::now();

    let outcome = p.on_layout_switched("RU", now, &platform);
    assert_eq!(outcome, SwitchOutcome::PulseStarted);
    assert_eq!(p.phase(), Phase::VisiblePulsing);
    assert_eq!(p.state().language.as_str(), "RU");
    assert_eq!(p.state().pulse_started_at, Some(now));
}

#[test]
fn pulse_runs_to_completion() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    let start = Instant::now();
    p.update_anchor(ScreenPoint::new(500, 500), &platform);
    p.on_layout_switched("RU", start, &platform);

    assert_eq!(p.tick_pulse(start + ms(260), &platform), PulseTick::Running);
    assert!(approx_eq(p.state().current_scale, 1.0));
    assert_eq!(p.state().geometry.height, 30);

    assert_eq!(p.tick_pulse(start + ms(520), &platform), PulseTick::Finished);
    assert!(approx_eq(p.state().current_scale, 0.5));
    assert_eq!(p.phase(), Phase::VisibleStatic);
    assert_eq!(p.state().geometry.height, 15);
    assert_eq!(p.state().geometry.origin(), ScreenPoint::new(510, 475));

    assert_eq!(p.tick_pulse(start + ms(600), &platform), PulseTick::Idle);
}

#[test]
fn second_switch_restarts_pulse() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    let start = Instant::now();
    p.on_layout_switched("RU", start, &platform);
    p.tick_pulse(start + ms(200), &platform);

    let restart = start + ms(300);
    p.on_layout_switched("EN", restart, &platform);
    assert_eq!(p.state().pulse_started_at, Some(restart));
    assert_eq!(p.tick_pulse(start + ms(600), &platform), PulseTick::Running);
}

#[test]
fn anchor_places_overlay_near_it() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    p.update_anchor(ScreenPoint::new(500, 500), &platform);
    assert_eq!(p.state().anchor, Some(ScreenPoint::new(500, 500)));
    assert_eq!(p.state().geometry.origin(), ScreenPoint::new(510, 475));
}

#[test]
fn no_anchor_centres_on_primary_work_area() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    p.show_centered_if_needed(&platform);
    assert!(p.state().visible);
    assert_eq!(p.state().geometry.origin(), ScreenPoint::new(946, 512));
}

#[test]
fn hidden_persistent_overlay_reappears_on_switch() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    p.on_auto_hide_timer();
    assert_eq!(p.phase(), Phase::Hidden);

    let outcome = p.on_layout_switched("RU", Instant::now(), &platform);
    assert_eq!(outcome, SwitchOutcome::PulseStarted);
    assert!(p.state().visible);
    assert_eq!(p.phase(), Phase::VisiblePulsing);
}

#[test]
fn centring_forgets_previous_anchor() {
    let platform = FakePlatform::desktop();
    let mut p = persistent();
    let start = Instant::now();
    p.update_anchor(ScreenPoint::new(500, 500), &platform);
    p.show_centered_if_needed(&platform);
    assert!(p.state().anchor.is_none());

    p.on_layout_switched("RU", start, &platform);
    p.tick_pulse(start + ms(260), &platform);
    // 38x30 badge at the pulse peak
    assert_eq!(p.state().geometry.origin(), ScreenPoint::new(941, 505));
}

// === Legacy Presenter Tests ===

#[test]
fn legacy_starts_hidden_at_switch_scale() {
    let p = legacy();
    assert!(!p.is_persistent());
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(approx_eq(p.state().current_scale, 1.0));
}

#[test]
fn legacy_switch_shows_banner_until_timer() {
    let platform = FakePlatform::desktop();
    let mut p = legacy();
    let now = Instant::now();

    let outcome = p.on_layout_switched("RU", now, &platform);
    assert_eq!(outcome, SwitchOutcome::AutoHideRestarted(ms(520)));
    assert_eq!(p.phase(), Phase::VisibleStatic);
    assert_eq!(p.hide_deadline(), Some(now + ms(520)));
    assert!(p.state().pulse_started_at.is_none());

    p.on_auto_hide_timer();
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.hide_deadline().is_none());
}

#[test]
fn legacy_switch_restarts_deadline() {
    let platform = FakePlatform::desktop();
    let mut p = legacy();
    let now = Instant::now();
    p.on_layout_switched("RU", now, &platform);
    p.on_layout_switched("EN", now + ms(300), &platform);
    assert_eq!(p.hide_deadline(), Some(now + ms(820)));
}

#[test]
fn legacy_anchor_updates_do_not_show_banner() {
    let platform = FakePlatform::desktop();
    let mut p = legacy();
    p.update_anchor(ScreenPoint::new(500, 500), &platform);
    assert_eq!(p.phase(), Phase::Hidden);

    p.show_centered_if_needed(&platform);
    assert_eq!(p.phase(), Phase::Hidden);
}

#[test]
fn legacy_pulse_tick_is_idle() {
    let platform = FakePlatform::desktop();
    let mut p = legacy();
    let now = Instant::now();
    p.on_layout_switched("RU", now, &platform);
    assert_eq!(p.tick_pulse(now + ms(16), &platform), PulseTick::Idle);
}

#[test]
fn blank_language_shows_placeholder() {
    let mut p = persistent();
    p.set_language("  ");
    assert_eq!(p.state().language.as_str(), "--");
}

#[test]
fn pulse_duration_is_clamped() {
    let settings = Settings {
        banner_duration_ms: 5000,
        ..Default::default()
    };
    let p = Presenter::new(&settings, FixedMeasure);
    assert_eq!(p.pulse_duration(), ms(1200));
}
