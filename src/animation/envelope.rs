//! Whole-strip sinusoidal brightness envelopes
//!
//! Every envelope has the shape `(1 + sin(phase + k * PI * progress)) / 2`,
//! scaled by the animation brightness.

use core::f32::consts::PI;

use libm::sinf;

use crate::color::{BLACK, Rgb, scale};

/// Envelope starts at its minimum
pub(crate) const PHASE_RISING: f32 = 1.5 * PI;
/// Envelope starts at its maximum
const PHASE_FALLING: f32 = 0.5 * PI;

/// Share of the cycle the error flashes occupy; the rest stays dark
const ERROR_DUTY_RATIO: f32 = 0.5;

/// Envelope value (0.0-1.0) for `progress`
#[inline]
pub(crate) fn envelope(phase: f32, k: f32, progress: f32) -> f32 {
    (1.0 + sinf(phase + k * PI * progress)) / 2.0
}

/// Set every pixel to `color` at `brightness`
pub(crate) fn fill(leds: &mut [Rgb], color: Rgb, brightness: f32) {
    let pixel = scale(color, brightness);
    for led in leds {
        *led = pixel;
    }
}

/// Monotonic rise from dark to full brightness
pub(crate) fn fade_in(leds: &mut [Rgb], color: Rgb, brightness: f32, progress: f32) {
    fill(leds, color, envelope(PHASE_RISING, 1.0, progress) * brightness);
}

/// Monotonic fall from full brightness to dark
pub(crate) fn fade_out(leds: &mut [Rgb], color: Rgb, brightness: f32, progress: f32) {
    fill(leds, color, envelope(PHASE_FALLING, 1.0, progress) * brightness);
}

/// One full breath per cycle
pub(crate) fn pulse(leds: &mut [Rgb], color: Rgb, brightness: f32, progress: f32) {
    fill(leds, color, envelope(PHASE_RISING, 2.0, progress) * brightness);
}

/// Two breaths squeezed into the first half of the cycle
pub(crate) fn error(leds: &mut [Rgb], color: Rgb, brightness: f32, progress: f32) {
    if progress > ERROR_DUTY_RATIO {
        fill(leds, BLACK, 0.0);
        return;
    }
    let partial = progress / ERROR_DUTY_RATIO;
    fill(leds, color, envelope(PHASE_RISING, 4.0, partial) * brightness);
}
