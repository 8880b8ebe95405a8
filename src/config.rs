//! Firmware configuration
//!
//! Compile-time defaults plus the config structs the link and the scheduler
//! are constructed from.

use embassy_time::Duration;

use crate::animation::{AnimationConfig, AnimationKind};
use crate::color::Rgb;

/// Target render rate
pub const FRAME_RATE: u64 = 120;

/// Render tick, also the delta every animation is advanced by
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / FRAME_RATE);

/// Reassembly buffer size; exceeding it discards the whole buffer
pub const BUFFER_CAPACITY: usize = 1000;

/// Largest chunk the serial reader requests per read
pub const READ_CHUNK_SIZE: usize = 256;

/// Depth of the command queue between link and scheduler
pub const COMMAND_QUEUE_SIZE: usize = 8;

pub const INITIAL_TIMEOUT: Duration = Duration::from_secs(120);
pub const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(60);
pub const WATCHDOG_PERIOD: Duration = Duration::from_secs(10);
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Connection liveness timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    /// Time allowed between boot (or reboot) and the first valid frame
    pub initial_timeout: Duration,
    /// Time allowed between keepalive-refreshing frames while active
    pub keepalive_timeout: Duration,
    /// Poll period of the watchdog
    pub watchdog_period: Duration,
    /// Upper bound of a single serial read
    pub read_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            initial_timeout: INITIAL_TIMEOUT,
            keepalive_timeout: KEEPALIVE_TIMEOUT,
            watchdog_period: WATCHDOG_PERIOD,
            read_timeout: READ_TIMEOUT,
        }
    }
}

/// Animations the firmware shows on its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    /// Shown from boot until the host connects
    pub startup: AnimationConfig,
    /// Shown after a liveness timeout until the host reboots the link
    pub error: AnimationConfig,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            startup: AnimationConfig {
                kind: AnimationKind::Loading,
                color: Rgb::new(0, 0, 255),
                duration: Duration::from_millis(2000),
                brightness: 0.8,
                infinite: true,
            },
            error: AnimationConfig {
                kind: AnimationKind::Error,
                color: Rgb::new(255, 0, 0),
                duration: Duration::from_millis(2000),
                brightness: 0.8,
                infinite: true,
            },
        }
    }
}
