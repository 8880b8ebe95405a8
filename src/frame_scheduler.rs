//! Render loop pacing
//!
//! Deadlines sit on a fixed grid derived from the frame duration. Only the
//! arithmetic lives here; the render task does the actual waiting.

use embassy_time::{Duration, Instant};

use crate::config::FRAME_DURATION;

/// Outcome of accounting for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next frame is due
    pub next_deadline: Instant,
    /// Time left until `next_deadline`, zero when already late
    pub sleep_duration: Duration,
}

/// Fixed-rate deadline tracker for the render task
///
/// A lag of up to two frames is caught up on the grid. Anything longer
/// restarts the grid from the current instant, so a stall never turns into a
/// burst of back-to-back frames.
///
/// ```ignore
/// let mut frames = FrameScheduler::new(FRAME_DURATION);
/// loop {
///     scheduler.lock().await.tick(FRAME_DURATION);
///     Timer::at(frames.tick(Instant::now()).next_deadline).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    next_frame: Instant,
    frame_duration: Duration,
}

impl FrameScheduler {
    pub const fn new(frame_duration: Duration) -> Self {
        Self {
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Record a rendered frame and compute the next deadline
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = self.next_frame.saturating_duration_since(now);

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(FRAME_DURATION)
    }
}
