//! Serial link state: reassembly, connection liveness and frame routing
//!
//! The link starts in [`ConnectionState::Initial`]. The first valid frame
//! makes it [`ConnectionState::Active`]; a timeout in either state drops it to
//! [`ConnectionState::Error`], which only a reboot command leaves.

use embassy_time::Instant;

use crate::config::LinkConfig;
use crate::log::log;
use crate::protocol::{Frame, HANDLER_ANIMATION, HANDLER_LOCAL, LocalCommand};
use crate::reassembler::{Extracted, FrameReassembler};
use crate::scheduler::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for the host's first frame
    Initial,
    /// Host is connected and keeping the link alive
    Active,
    /// Liveness lost; waiting for a reboot command
    Error,
}

/// Side effects of one processed frame that the caller should apply
///
/// Both are applied outside the link lock: the indicator on the animation
/// scheduler, the forwarded frame onto the command queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Indicator change to apply
    pub indicator: Option<Indicator>,
    /// Animation frame to enqueue
    pub forward: Option<Frame>,
}

impl Dispatch {
    /// Check if anything needs to be applied
    pub const fn has_effects(&self) -> bool {
        self.indicator.is_some() || self.forward.is_some()
    }
}

/// Reassembly buffer plus connection state machine
#[derive(Debug)]
pub struct Link {
    config: LinkConfig,
    reassembler: FrameReassembler,

    state: ConnectionState,
    started_at: Instant,
    last_keepalive: Instant,
}

impl Link {
    pub const fn new(now: Instant, config: LinkConfig) -> Self {
        Self {
            config,
            reassembler: FrameReassembler::new(),
            state: ConnectionState::Initial,
            started_at: now,
            last_keepalive: now,
        }
    }

    /// Buffer newly received bytes
    pub fn ingest(&mut self, bytes: &[u8]) {
        self.reassembler.extend(bytes);
    }

    /// Extract and process the next buffered frame
    ///
    /// Returns `None` once the buffer holds no further complete frame.
    pub fn next_dispatch(&mut self, now: Instant) -> Option<Dispatch> {
        let dispatch = match self.reassembler.next_extracted()? {
            Extracted::Frame(frame) => self.handle_frame(frame, now),
            Extracted::Oversized { handler_id, len } => {
                self.handle_oversized(handler_id, len, now)
            }
        };
        Some(dispatch)
    }

    /// Route one validated frame
    ///
    /// Any valid frame connects an initial link and refreshes the keepalive
    /// clock of an active one. While in error only a reboot is honored.
    pub fn handle_frame(&mut self, frame: Frame, now: Instant) -> Dispatch {
        let mut dispatch = Dispatch::default();

        match self.state {
            ConnectionState::Error => {
                if LocalCommand::decode(&frame) == Ok(LocalCommand::Reboot) {
                    dispatch.indicator = Some(self.reboot(now));
                } else {
                    log!("[Link.handle_frame] link in error, dropping frame");
                }
                return dispatch;
            }
            ConnectionState::Initial | ConnectionState::Active => {
                dispatch.indicator = self.mark_alive(now);
            }
        }

        match frame.handler_id() {
            HANDLER_ANIMATION => dispatch.forward = Some(frame),
            HANDLER_LOCAL => match LocalCommand::decode(&frame) {
                Ok(LocalCommand::KeepAliveReset) => {
                    if self.state == ConnectionState::Active {
                        self.last_keepalive = now;
                    }
                }
                Ok(LocalCommand::Reboot) => {
                    dispatch.indicator = Some(self.reboot(now));
                }
                Err(error) => {
                    log!("[Link.handle_frame] dropping local frame: {:?}", error);
                }
            },
            other => {
                log!("[Link.handle_frame] unknown handler {:#04x}", other);
            }
        }

        dispatch
    }

    /// Account for a valid frame too large to carry any command
    ///
    /// It still counts as traffic from the host; only its content is dropped.
    fn handle_oversized(&mut self, handler_id: u8, len: usize, now: Instant) -> Dispatch {
        let mut dispatch = Dispatch::default();
        if self.state == ConnectionState::Error {
            log!("[Link.handle_oversized] link in error, dropping frame");
            return dispatch;
        }

        dispatch.indicator = self.mark_alive(now);
        log!(
            "[Link.handle_oversized] dropping {} byte frame for handler {:#04x}",
            len,
            handler_id
        );
        dispatch
    }

    /// Refresh the keepalive clock, connecting an initial link
    fn mark_alive(&mut self, now: Instant) -> Option<Indicator> {
        self.last_keepalive = now;
        if self.state != ConnectionState::Initial {
            return None;
        }

        log!("[Link.mark_alive] host connected");
        self.state = ConnectionState::Active;
        Some(Indicator::CancelStartup)
    }

    /// Evaluate the liveness timers
    ///
    /// Returns the indicator to show if the link just dropped to error.
    pub fn check_timeouts(&mut self, now: Instant) -> Option<Indicator> {
        let expired = match self.state {
            ConnectionState::Initial => {
                now.saturating_duration_since(self.started_at) > self.config.initial_timeout
            }
            ConnectionState::Active => {
                now.saturating_duration_since(self.last_keepalive) > self.config.keepalive_timeout
            }
            ConnectionState::Error => false,
        };
        if !expired {
            return None;
        }

        log!("[Link.check_timeouts] {:?} timed out", self.state);
        self.state = ConnectionState::Error;
        Some(Indicator::Error)
    }

    fn reboot(&mut self, now: Instant) -> Indicator {
        log!("[Link.reboot] resetting link");
        self.state = ConnectionState::Initial;
        self.started_at = now;
        self.last_keepalive = now;
        Indicator::Startup
    }

    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    pub const fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Number of bytes waiting in the reassembly buffer
    pub fn buffered(&self) -> usize {
        self.reassembler.len()
    }
}
