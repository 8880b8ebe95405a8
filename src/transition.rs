//! Timed linear transitions for a running animation's color and brightness
//!
//! A transition is a pure function of its accumulated elapsed time. The owner
//! advances it once per tick and drops it as soon as it reports finished.

use embassy_time::Duration;

use crate::color::{Rgb, blend_colors};

/// Blends two values of type `T` using a progress value (0.0-1.0)
pub type ValueBlender<T> = fn(T, T, f32) -> T;

/// Transition for values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    /// Blender function
    blend: ValueBlender<T>,
    /// Value at the start of transition
    initial: T,
    /// Value reached once `duration` has elapsed
    target: T,
    /// Total transition duration
    duration: Duration,
    /// Time accumulated so far, clamped to `duration`
    elapsed: Duration,
    finished: bool,
}

impl<T: Copy> ValueTransition<T> {
    /// Create a new value transition
    pub const fn new(initial: T, target: T, duration: Duration, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            initial,
            target,
            duration,
            elapsed: Duration::from_millis(0),
            finished: false,
        }
    }

    /// Get the interpolated value for the current elapsed time
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> T {
        if self.elapsed >= self.duration {
            return self.target;
        }
        let progress = self.elapsed.as_micros() as f32 / self.duration.as_micros() as f32;
        (self.blend)(self.initial, self.target, progress)
    }

    /// Advance the transition by `delta` and return the new value
    ///
    /// Call this once per frame with the frame delta time.
    pub fn advance(&mut self, delta: Duration) -> T {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.finished = true;
        }
        self.value()
    }

    /// Check if the target value has been reached
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub const fn target(&self) -> T {
        self.target
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

/// Color change of a running animation
pub type ColorTransition = ValueTransition<Rgb>;

/// Brightness change of a running animation
pub type BrightnessTransition = ValueTransition<f32>;

impl ValueTransition<Rgb> {
    /// Create a new rgb transition
    pub const fn new_rgb(initial: Rgb, target: Rgb, duration: Duration) -> Self {
        Self::new(initial, target, duration, blend_colors)
    }
}

impl ValueTransition<f32> {
    /// Create a new brightness transition
    pub const fn new_brightness(initial: f32, target: f32, duration: Duration) -> Self {
        Self::new(initial, target, duration, lerp_brightness)
    }
}

fn lerp_brightness(a: f32, b: f32, progress: f32) -> f32 {
    a + (b - a) * progress
}
