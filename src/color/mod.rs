//! Color type and brightness helpers
//!
//! Colors are plain 8-bit RGB triples; brightness is a float factor in
//! `0.0..=1.0` that is applied when a pixel is written into the frame.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Convert a wire brightness level (0-255) to a factor (0.0-1.0)
#[inline]
pub fn level_to_brightness(level: u8) -> f32 {
    f32::from(level) / 255.0
}

/// Scale a single channel by a brightness factor
///
/// The result is truncated, so `scale8_f(255, 0.5)` is `127`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale8_f(value: u8, brightness: f32) -> u8 {
    (f32::from(value) * brightness.clamp(0.0, 1.0)) as u8
}

/// Scale every channel of a color by a brightness factor
#[inline]
pub fn scale(color: Rgb, brightness: f32) -> Rgb {
    Rgb {
        r: scale8_f(color.r, brightness),
        g: scale8_f(color.g, brightness),
        b: scale8_f(color.b, brightness),
    }
}

/// Linearly interpolate a single channel
///
/// `progress` is expected in `0.0..=1.0`; values outside are clamped.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp8(a: u8, b: u8, progress: f32) -> u8 {
    let progress = progress.clamp(0.0, 1.0);
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * progress) as u8
}

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - Initial color
/// * `b` - Target color
/// * `progress` - Blend factor (0.0 = all a, 1.0 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, progress: f32) -> Rgb {
    Rgb {
        r: lerp8(a.r, b.r, progress),
        g: lerp8(a.g, b.g, progress),
        b: lerp8(a.b, b.b, progress),
    }
}
