//! Pulse curve: one smooth scale-up and back down.

use std::f64::consts::PI;
use std::time::Duration;

/// Fraction of the pulse elapsed, clamped to [0, 1].
pub fn pulse_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Scale at progress `t`: `base` at both ends, `peak` at the midpoint.
pub fn pulse_scale(base: f64, peak: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return base;
    }
    let pulse = (PI * t).sin();
    base * (1.0 - pulse) + peak * pulse
}
