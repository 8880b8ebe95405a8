#![no_std]

pub mod animation;
pub mod channel;
pub mod color;
pub mod config;
pub mod frame_scheduler;
pub mod link;
mod log;
pub mod protocol;
pub mod reassembler;
pub mod scheduler;
pub mod strip;
pub mod tasks;
pub mod transition;

pub use animation::{Animation, AnimationConfig, AnimationKind};
pub use channel::{CommandChannel, CommandReceiver, CommandSender};
pub use config::{IndicatorConfig, LinkConfig};
pub use frame_scheduler::FrameScheduler;
pub use link::{ConnectionState, Dispatch, Link};
pub use protocol::{AnimationCommand, Frame, LocalCommand};
pub use reassembler::{Extracted, FrameReassembler};
pub use scheduler::{AnimationScheduler, Indicator};
pub use strip::SmartLedsStrip;
pub use tasks::{SharedLink, SharedScheduler};
pub use transition::{BrightnessTransition, ColorTransition, ValueTransition};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip trait
///
/// Implement this trait to support different hardware platforms.
/// The animation scheduler is generic over this trait.
pub trait LightStrip {
    /// Transmit colors to the LED strip, returning once the transfer is done
    fn write(&mut self, colors: &[Rgb]);
}

/// Abstract serial input trait
pub trait SerialInput {
    /// Read up to `buf.len()` available bytes
    ///
    /// Resolves with the number of bytes written into `buf` once at least one
    /// byte is available. The reader task bounds every call with a timeout.
    fn read(&mut self, buf: &mut [u8]) -> impl Future<Output = usize>;
}
