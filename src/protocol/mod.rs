//! Serial wire protocol
//!
//! Frame format (multi-byte integers are big-endian):
//! - START (1 byte): `0xFF`
//! - LENGTH (2 bytes): total frame length, both markers included
//! - HANDLER (1 byte): routing key, see [`HANDLER_ANIMATION`] and [`HANDLER_LOCAL`]
//! - BODY (0.. bytes): sub-command id followed by its arguments
//! - CHECKSUM (2 bytes): sum of HANDLER and BODY bytes, mod 2^16
//! - END (1 byte): `0xFE`

mod command;

use heapless::Vec;

pub use command::{AnimationCommand, LocalCommand};

/// Frame synchronization byte
pub const START_BYTE: u8 = 0xFF;

/// Frame terminator byte
pub const END_BYTE: u8 = 0xFE;

/// START + LENGTH + HANDLER + CHECKSUM + END
pub const MIN_FRAME_LEN: usize = 7;

/// Largest frame a [`Frame`] can hold
///
/// The longest defined command is 17 bytes; anything larger that still passes
/// integrity checks is a protocol violation.
pub const MAX_FRAME_LEN: usize = 32;

/// Frames forwarded whole to the animation scheduler
pub const HANDLER_ANIMATION: u8 = 0x01;
/// Frames handled in-line by the link dispatcher
pub const HANDLER_LOCAL: u8 = 0x02;

const LENGTH_OFFSET: usize = 1;
/// Position of the routing key within a frame
pub const HANDLER_OFFSET: usize = 3;
const COMMAND_OFFSET: usize = 4;
/// CHECKSUM + END
const TRAILER_LEN: usize = 3;

/// Errors raised while validating or decoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Frame is shorter than its own length field, or than [`MIN_FRAME_LEN`]
    Truncated,
    /// Start or end marker does not match
    InvalidMarker,
    /// Stored checksum differs from the computed one
    ChecksumMismatch { expected: u16, actual: u16 },
    /// Valid frame that does not fit into [`MAX_FRAME_LEN`]
    FrameTooLarge(usize),
    /// Command frame with a size other than the command requires
    InvalidLength { expected: usize, actual: usize },
    /// Frame carries no sub-command byte
    MissingCommand,
    UnknownHandler(u8),
    UnknownCommand(u8),
    UnknownAnimation(u8),
}

/// Sum of `bytes`, mod 2^16
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)))
}

/// Read the big-endian length field of a frame starting at `bytes[0]`
///
/// Returns `None` if fewer than three bytes are available.
pub fn read_length(bytes: &[u8]) -> Option<usize> {
    let hi = *bytes.get(LENGTH_OFFSET)?;
    let lo = *bytes.get(LENGTH_OFFSET + 1)?;
    Some(usize::from(u16::from_be_bytes([hi, lo])))
}

/// A validated protocol frame, markers included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// Validate a complete frame
    ///
    /// `bytes` must hold exactly one frame: the length field has to match
    /// `bytes.len()`, both markers have to be in place and the checksum has
    /// to match. Only then is the size checked against [`MAX_FRAME_LEN`].
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(Error::Truncated);
        }
        if bytes[0] != START_BYTE {
            return Err(Error::InvalidMarker);
        }
        let len = read_length(bytes).ok_or(Error::Truncated)?;
        if len != bytes.len() {
            return Err(Error::Truncated);
        }
        if bytes[len - 1] != END_BYTE {
            return Err(Error::InvalidMarker);
        }

        let checksum_at = len - TRAILER_LEN;
        let expected = u16::from_be_bytes([bytes[checksum_at], bytes[checksum_at + 1]]);
        let actual = checksum(&bytes[HANDLER_OFFSET..checksum_at]);
        if expected != actual {
            return Err(Error::ChecksumMismatch { expected, actual });
        }

        let bytes = Vec::from_slice(bytes).map_err(|()| Error::FrameTooLarge(len))?;
        Ok(Self { bytes })
    }

    /// Build a frame around `body` (sub-command id and arguments)
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(handler_id: u8, body: &[u8]) -> Result<Self, Error> {
        let len = MIN_FRAME_LEN + body.len();
        if len > MAX_FRAME_LEN {
            return Err(Error::FrameTooLarge(len));
        }

        let mut bytes = Vec::new();
        let mut push = |chunk: &[u8]| {
            bytes
                .extend_from_slice(chunk)
                .map_err(|()| Error::FrameTooLarge(len))
        };
        push(&[START_BYTE])?;
        push(&(len as u16).to_be_bytes())?;
        push(&[handler_id])?;
        push(body)?;
        let sum = checksum(body).wrapping_add(u16::from(handler_id));
        push(&sum.to_be_bytes())?;
        push(&[END_BYTE])?;

        Ok(Self { bytes })
    }

    /// Routing key (byte 3)
    pub fn handler_id(&self) -> u8 {
        self.bytes[HANDLER_OFFSET]
    }

    /// Sub-command id (byte 4), if the frame carries one
    pub fn command_id(&self) -> Option<u8> {
        self.body().first().copied()
    }

    /// Sub-command id and its arguments
    pub fn body(&self) -> &[u8] {
        &self.bytes[COMMAND_OFFSET..self.bytes.len() - TRAILER_LEN]
    }

    /// Total frame length, markers included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; a frame holds at least [`MIN_FRAME_LEN`] bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
