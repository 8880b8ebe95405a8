//! Bounded command queue between the serial link and the animation scheduler.
//!
//! Animation frames are handed over whole; the intake task decodes them.
//! Sending waits while the queue is full, so commands are delayed under
//! backpressure but never dropped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::COMMAND_QUEUE_SIZE;
use crate::protocol::Frame;

/// Type alias for the command channel
pub type CommandChannel = Channel<CriticalSectionRawMutex, Frame, COMMAND_QUEUE_SIZE>;

/// Type alias for command sender
pub type CommandSender<'a> = Sender<'a, CriticalSectionRawMutex, Frame, COMMAND_QUEUE_SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, Frame, COMMAND_QUEUE_SIZE>;
