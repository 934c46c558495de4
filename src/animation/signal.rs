//! Physiological signals: closed-form periodic functions of elapsed time.
//!
//! Each signal is a pure function of the clock — no accumulators, no
//! state. High even powers of sine shape the cardiac waveform: the
//! sixteenth power is near zero through most of the cycle and spikes
//! sharply at the crest, which reads as a systolic snap followed by a
//! long diastolic relaxation.

use std::f32::consts::FRAC_PI_4;

/// Ventricular contraction spike. `sin(4t)^16`, in [0, 1].
#[inline]
#[must_use]
pub fn cardiac_systole(t: f32) -> f32 {
    (4.0 * t).sin().powi(16)
}

/// Ventricular relaxation, broader and phase-led. `sin(4t + 0.2)^8`.
#[inline]
#[must_use]
pub fn cardiac_diastole(t: f32) -> f32 {
    (4.0 * t + 0.2).sin().powi(8)
}

/// Atrial contraction, phase-trailing the ventricles. `sin(4t - 0.2)^12`.
#[inline]
#[must_use]
pub fn atrial_contraction(t: f32) -> f32 {
    (4.0 * t - 0.2).sin().powi(12)
}

/// Breathing: a fast shallow cycle plus an occasional deeper swell.
///
/// `0.15·sin(0.5t) + 0.05·(0.3·sin(0.2t))`, signed — positive is
/// inhalation.
#[inline]
#[must_use]
pub fn breathing(t: f32) -> f32 {
    let base = (0.5 * t).sin();
    let deep = (0.2 * t).sin() * 0.3;
    0.15 * base + 0.05 * deep
}

/// Slow cortical volume sway. `1 + sin(0.4t)·0.001`.
#[inline]
#[must_use]
pub fn cortical_base(t: f32) -> f32 {
    1.0 + (0.4 * t).sin() * 0.001
}

/// Asymmetric neural-activity flutter. `sin(1.2t)·0.0008·sin(1.5t)`.
#[inline]
#[must_use]
pub fn cortical_activity(t: f32) -> f32 {
    (1.2 * t).sin() * 0.0008 * (1.5 * t).sin()
}

/// Cerebral blood-flow swell, quarter-cycle offset from the sway.
#[inline]
#[must_use]
pub fn blood_flow(t: f32) -> f32 {
    (0.6 * t + FRAC_PI_4).sin() * 0.0008
}
