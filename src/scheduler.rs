use embassy_time::Duration;

use crate::LightStrip;
use crate::animation::{Animation, AnimationConfig};
use crate::color::{BLACK, Rgb};
use crate::config::IndicatorConfig;
use crate::log::log;
use crate::protocol::AnimationCommand;

/// Firmware-initiated animation changes requested by the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Host connected: let the startup animation finish its cycle
    CancelStartup,
    /// Link reset: restart the startup animation immediately
    Startup,
    /// Liveness lost: show the error animation immediately
    Error,
}

/// Animation scheduler - owns the playing animation, its successor and the
/// pixel buffer
///
/// At most one animation is current and at most one waits behind it.
/// Scheduling never queues deeper: a new successor replaces the old one.
pub struct AnimationScheduler<S: LightStrip, const N: usize> {
    strip: S,
    indicators: IndicatorConfig,

    current: Option<Animation>,
    next: Option<Animation>,
    frame: [Rgb; N],
}

impl<S: LightStrip, const N: usize> AnimationScheduler<S, N> {
    /// Create an idle scheduler
    ///
    /// Nothing plays until an animation is started; use
    /// [`Self::with_startup`] to show the startup indicator from boot.
    pub fn new(strip: S, indicators: IndicatorConfig) -> Self {
        Self {
            strip,
            indicators,
            current: None,
            next: None,
            frame: [BLACK; N],
        }
    }

    /// Create a scheduler already playing the startup indicator
    ///
    /// This is the boot state: the indicator loops until the host connects.
    pub fn with_startup(strip: S, indicators: IndicatorConfig) -> Self {
        let mut scheduler = Self::new(strip, indicators);
        scheduler.apply_indicator(Indicator::Startup);
        scheduler
    }

    /// Schedule a new animation
    ///
    /// Without a current animation it starts right away. With `interrupt`
    /// the strip is blanked and the new animation replaces both slots.
    /// Otherwise it becomes the successor, and an infinite current animation
    /// is told to finish its cycle.
    pub fn start_animation(&mut self, config: &AnimationConfig, interrupt: bool) {
        let animation = Animation::new(config);
        let Some(current) = self.current.as_mut() else {
            self.current = Some(animation);
            return;
        };

        if interrupt {
            self.blank();
            self.current = Some(animation);
            self.next = None;
        } else {
            current.set_infinite(false);
            self.next = Some(animation);
        }
    }

    /// Stop playback
    ///
    /// With `interrupt` the strip is blanked and both slots are cleared.
    /// Otherwise the current animation finishes its cycle and nothing follows.
    pub fn stop_animation(&mut self, interrupt: bool) {
        let Some(current) = self.current.as_mut() else {
            return;
        };

        if interrupt {
            self.blank();
            self.current = None;
        } else {
            current.set_infinite(false);
        }
        self.next = None;
    }

    /// Move on to the successor
    ///
    /// With `interrupt` the strip is blanked and the successor starts now.
    /// Otherwise the current animation finishes its cycle first.
    pub fn skip_animation(&mut self, interrupt: bool) {
        let Some(current) = self.current.as_mut() else {
            return;
        };

        if interrupt {
            self.blank();
            self.promote_next();
        } else {
            current.set_infinite(false);
        }
    }

    /// Change the color of the current animation
    pub fn change_color(&mut self, color: Rgb, duration: Duration) {
        if let Some(current) = self.current.as_mut() {
            current.change_color(color, duration);
        }
    }

    /// Change the brightness of the current animation
    pub fn change_brightness(&mut self, brightness: f32, duration: Duration) {
        if let Some(current) = self.current.as_mut() {
            current.change_brightness(brightness, duration);
        }
    }

    /// Advance, render and show the current animation
    ///
    /// Returns `false` without touching the strip when idle.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        current.update(delta);
        current.render(&mut self.frame);
        let finished = current.is_finished();
        self.strip.write(&self.frame);

        if finished {
            log!("[AnimationScheduler.tick] {:?} finished", current.kind());
            self.promote_next();
        }
        true
    }

    /// Apply a decoded wire command
    pub fn apply(&mut self, command: AnimationCommand) {
        match command {
            AnimationCommand::Start { config, interrupt } => {
                self.start_animation(&config, interrupt);
            }
            AnimationCommand::Stop { interrupt } => self.stop_animation(interrupt),
            AnimationCommand::Skip { interrupt } => self.skip_animation(interrupt),
            AnimationCommand::ChangeColor { color, duration } => {
                self.change_color(color, duration);
            }
            AnimationCommand::ChangeBrightness {
                brightness,
                duration,
            } => self.change_brightness(brightness, duration),
        }
    }

    /// Apply an indicator change requested by the link
    pub fn apply_indicator(&mut self, indicator: Indicator) {
        log!("[AnimationScheduler.apply_indicator] {:?}", indicator);
        match indicator {
            Indicator::CancelStartup => self.stop_animation(false),
            Indicator::Startup => {
                let startup = self.indicators.startup;
                self.start_animation(&startup, true);
            }
            Indicator::Error => {
                let error = self.indicators.error;
                self.start_animation(&error, true);
            }
        }
    }

    /// Replace the current animation with the successor, if any
    fn promote_next(&mut self) {
        self.current = self.next.take();
    }

    /// Clear the strip synchronously
    fn blank(&mut self) {
        self.frame = [BLACK; N];
        self.strip.write(&self.frame);
    }

    pub fn current(&self) -> Option<&Animation> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Animation> {
        self.next.as_ref()
    }

    /// Last rendered pixel buffer
    pub fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn indicators(&self) -> &IndicatorConfig {
        &self.indicators
    }
}
