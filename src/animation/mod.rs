//! Animation system with compile-time known variants
//!
//! The variant set is fixed by the wire protocol, so animations are a single
//! struct tagged with an [`AnimationKind`]. Progress, color and brightness
//! transitions are shared; only the pixel function differs per kind.

mod envelope;
mod loading;

use embassy_time::Duration;

use crate::color::Rgb;
use crate::transition::{BrightnessTransition, ColorTransition};

const ANIMATION_ID_LOADING: u8 = 0x01;
const ANIMATION_ID_FADE_IN: u8 = 0x02;
const ANIMATION_ID_FADE_OUT: u8 = 0x03;
const ANIMATION_ID_ERROR: u8 = 0x04;
const ANIMATION_ID_PULSE: u8 = 0x05;

/// Known animation kinds, numbered as on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationKind {
    /// Lit segment traveling across the strip
    Loading = ANIMATION_ID_LOADING,
    FadeIn = ANIMATION_ID_FADE_IN,
    FadeOut = ANIMATION_ID_FADE_OUT,
    /// Two quick flashes, then dark for the rest of the cycle
    Error = ANIMATION_ID_ERROR,
    /// Whole strip breathing once per cycle
    Pulse = ANIMATION_ID_PULSE,
}

impl AnimationKind {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_LOADING => Self::Loading,
            ANIMATION_ID_FADE_IN => Self::FadeIn,
            ANIMATION_ID_FADE_OUT => Self::FadeOut,
            ANIMATION_ID_ERROR => Self::Error,
            ANIMATION_ID_PULSE => Self::Pulse,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Parameters an [`Animation`] is constructed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub kind: AnimationKind,
    pub color: Rgb,
    /// Length of one cycle
    pub duration: Duration,
    /// Peak brightness factor (0.0-1.0)
    pub brightness: f32,
    /// Restart the cycle instead of finishing
    pub infinite: bool,
}

/// A running animation
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    color: Rgb,
    brightness: f32,
    duration: Duration,
    infinite: bool,

    elapsed: Duration,
    progress: f32,
    finished: bool,

    color_transition: Option<ColorTransition>,
    brightness_transition: Option<BrightnessTransition>,
}

impl Animation {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            kind: config.kind,
            color: config.color,
            brightness: config.brightness.clamp(0.0, 1.0),
            duration: config.duration,
            infinite: config.infinite,
            elapsed: Duration::from_millis(0),
            progress: 0.0,
            finished: false,
            color_transition: None,
            brightness_transition: None,
        }
    }

    /// Advance the animation clock and any running transitions
    ///
    /// When a cycle completes, progress reads `1.0` for that tick. An infinite
    /// animation then restarts its cycle, a finite one is marked finished.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, delta: Duration) {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.progress = 1.0;
            if self.infinite {
                self.elapsed = Duration::from_millis(0);
            } else {
                self.finished = true;
            }
        } else {
            self.progress = self.elapsed.as_micros() as f32 / self.duration.as_micros() as f32;
        }

        if let Some(transition) = &mut self.color_transition {
            self.color = transition.advance(delta);
            if transition.is_finished() {
                self.color_transition = None;
            }
        }

        if let Some(transition) = &mut self.brightness_transition {
            self.brightness = transition.advance(delta);
            if transition.is_finished() {
                self.brightness_transition = None;
            }
        }
    }

    /// Paint the current state into `leds`
    pub fn render(&self, leds: &mut [Rgb]) {
        match self.kind {
            AnimationKind::Loading => {
                loading::render(leds, self.color, self.brightness, self.progress);
            }
            AnimationKind::FadeIn => {
                envelope::fade_in(leds, self.color, self.brightness, self.progress);
            }
            AnimationKind::FadeOut => {
                envelope::fade_out(leds, self.color, self.brightness, self.progress);
            }
            AnimationKind::Error => {
                envelope::error(leds, self.color, self.brightness, self.progress);
            }
            AnimationKind::Pulse => {
                envelope::pulse(leds, self.color, self.brightness, self.progress);
            }
        }
    }

    /// Change the color, snapping when `duration` is zero
    pub fn change_color(&mut self, color: Rgb, duration: Duration) {
        if duration.as_ticks() == 0 {
            self.color = color;
            self.color_transition = None;
            return;
        }
        self.color_transition = Some(ColorTransition::new_rgb(self.color, color, duration));
    }

    /// Change the brightness, snapping when `duration` is zero
    pub fn change_brightness(&mut self, brightness: f32, duration: Duration) {
        let brightness = brightness.clamp(0.0, 1.0);
        if duration.as_ticks() == 0 {
            self.brightness = brightness;
            self.brightness_transition = None;
            return;
        }
        self.brightness_transition = Some(BrightnessTransition::new_brightness(
            self.brightness,
            brightness,
            duration,
        ));
    }

    pub const fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Position within the current cycle (0.0-1.0)
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    pub const fn is_infinite(&self) -> bool {
        self.infinite
    }

    /// Clearing the flag lets the animation finish at the end of its cycle
    pub fn set_infinite(&mut self, infinite: bool) {
        self.infinite = infinite;
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Check if a color or brightness transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.color_transition.is_some() || self.brightness_transition.is_some()
    }
}
