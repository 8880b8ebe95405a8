//! Traveling segment
//!
//! Every pixel owns a window of `WINDOW_RATIO` of the cycle, shifted by its
//! index so the first pixel's window opens at 0.0 and the last one's closes
//! at 1.0. Inside its window a pixel runs one full breath; outside it stays
//! dark.

use super::envelope::{PHASE_RISING, envelope};
use crate::color::{Rgb, scale};

const WINDOW_RATIO: f32 = 0.6;

#[allow(clippy::cast_precision_loss)]
pub(crate) fn render(leds: &mut [Rgb], color: Rgb, brightness: f32, progress: f32) {
    let count = leds.len();
    let offset = if count > 1 {
        (1.0 - WINDOW_RATIO) / (count - 1) as f32
    } else {
        0.0
    };

    for (index, led) in leds.iter_mut().enumerate() {
        let start = index as f32 * offset;
        let end = start + WINDOW_RATIO;
        let level = if progress >= start && progress < end {
            let pixel_progress = (progress - start) / WINDOW_RATIO;
            envelope(PHASE_RISING, 2.0, pixel_progress) * brightness
        } else {
            0.0
        };
        *led = scale(color, level);
    }
}
