use embassy_time::Duration;

use super::{Error, Frame, HANDLER_ANIMATION, HANDLER_LOCAL};
use crate::animation::{AnimationConfig, AnimationKind};
use crate::color::{Rgb, level_to_brightness};

const CMD_START_ANIMATION: u8 = 0x01;
const CMD_STOP_ANIMATION: u8 = 0x02;
const CMD_SKIP_ANIMATION: u8 = 0x03;
const CMD_CHANGE_COLOR: u8 = 0x04;
const CMD_CHANGE_BRIGHTNESS: u8 = 0x05;

const CMD_KEEP_ALIVE_RESET: u8 = 0x01;
const CMD_REBOOT: u8 = 0x02;

const START_ANIMATION_LEN: usize = 17;
const STOP_ANIMATION_LEN: usize = 9;
const SKIP_ANIMATION_LEN: usize = 9;
const CHANGE_COLOR_LEN: usize = 13;
const CHANGE_BRIGHTNESS_LEN: usize = 11;
const LOCAL_COMMAND_LEN: usize = 8;

/// Commands carried by [`HANDLER_ANIMATION`] frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCommand {
    /// Start an animation, either preempting or queued behind the current one
    Start {
        config: AnimationConfig,
        interrupt: bool,
    },
    Stop { interrupt: bool },
    Skip { interrupt: bool },
    /// Transition the current animation's color; zero duration snaps
    ChangeColor { color: Rgb, duration: Duration },
    /// Transition the current animation's brightness; zero duration snaps
    ChangeBrightness { brightness: f32, duration: Duration },
}

/// Commands carried by [`HANDLER_LOCAL`] frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    KeepAliveReset,
    Reboot,
}

impl AnimationCommand {
    /// Decode an animation command frame
    ///
    /// Every sub-command has a fixed frame size; a frame of any other size is
    /// rejected even when it is otherwise well-formed.
    pub fn decode(frame: &Frame) -> Result<Self, Error> {
        expect_handler(frame, HANDLER_ANIMATION)?;
        let command = frame.command_id().ok_or(Error::MissingCommand)?;
        let args = &frame.body()[1..];

        match command {
            CMD_START_ANIMATION => {
                expect_len(frame, START_ANIMATION_LEN)?;
                let kind = AnimationKind::from_raw(args[0])
                    .ok_or(Error::UnknownAnimation(args[0]))?;
                let config = AnimationConfig {
                    kind,
                    color: Rgb::new(args[1], args[2], args[3]),
                    duration: read_duration(args[4], args[5]),
                    brightness: level_to_brightness(args[6]),
                    infinite: args[7] != 0,
                };
                Ok(Self::Start {
                    config,
                    interrupt: args[8] != 0,
                })
            }
            CMD_STOP_ANIMATION => {
                expect_len(frame, STOP_ANIMATION_LEN)?;
                Ok(Self::Stop {
                    interrupt: args[0] != 0,
                })
            }
            CMD_SKIP_ANIMATION => {
                expect_len(frame, SKIP_ANIMATION_LEN)?;
                Ok(Self::Skip {
                    interrupt: args[0] != 0,
                })
            }
            CMD_CHANGE_COLOR => {
                expect_len(frame, CHANGE_COLOR_LEN)?;
                Ok(Self::ChangeColor {
                    color: Rgb::new(args[0], args[1], args[2]),
                    duration: read_duration(args[3], args[4]),
                })
            }
            CMD_CHANGE_BRIGHTNESS => {
                expect_len(frame, CHANGE_BRIGHTNESS_LEN)?;
                Ok(Self::ChangeBrightness {
                    brightness: level_to_brightness(args[0]),
                    duration: read_duration(args[1], args[2]),
                })
            }
            other => Err(Error::UnknownCommand(other)),
        }
    }
}

impl LocalCommand {
    /// Decode a local command frame
    pub fn decode(frame: &Frame) -> Result<Self, Error> {
        expect_handler(frame, HANDLER_LOCAL)?;
        let command = frame.command_id().ok_or(Error::MissingCommand)?;
        let command = match command {
            CMD_KEEP_ALIVE_RESET => Self::KeepAliveReset,
            CMD_REBOOT => Self::Reboot,
            other => return Err(Error::UnknownCommand(other)),
        };
        expect_len(frame, LOCAL_COMMAND_LEN)?;
        Ok(command)
    }
}

fn expect_handler(frame: &Frame, handler_id: u8) -> Result<(), Error> {
    if frame.handler_id() == handler_id {
        Ok(())
    } else {
        Err(Error::UnknownHandler(frame.handler_id()))
    }
}

fn expect_len(frame: &Frame, expected: usize) -> Result<(), Error> {
    if frame.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            expected,
            actual: frame.len(),
        })
    }
}

fn read_duration(hi: u8, lo: u8) -> Duration {
    Duration::from_millis(u64::from(u16::from_be_bytes([hi, lo])))
}
