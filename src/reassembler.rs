//! Frame recovery from a partially delivered byte stream
//!
//! Bytes are appended to a rolling buffer and scanned for frames one start
//! marker at a time. A candidate that fails any check (length out of reach,
//! wrong end marker, checksum mismatch) only advances the scan by one byte, so
//! a start marker inside noise or inside a payload never hides the real frame
//! behind it.
//!
//! Frames that pass every check but exceed the frame size limit are still
//! reported, so the link can count them as traffic before dropping them.
//!
//! A length field that can never be satisfied stalls the scan at that byte
//! until the buffer overflows and is discarded.

use heapless::Vec;

use crate::config::BUFFER_CAPACITY;
use crate::log::log;
use crate::protocol::{Error, Frame, HANDLER_OFFSET, MIN_FRAME_LEN, START_BYTE, read_length};

/// One unit recovered from the byte stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Frame(Frame),
    /// Passed every integrity check but is too long to be a command
    ///
    /// Only the routing key survives; the bytes are already consumed.
    Oversized { handler_id: u8, len: usize },
}

impl Extracted {
    /// Number of stream bytes the unit occupied
    pub fn len(&self) -> usize {
        match self {
            Self::Frame(frame) => frame.len(),
            Self::Oversized { len, .. } => *len,
        }
    }

    /// Always `false`; anything extracted spans at least [`MIN_FRAME_LEN`] bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rolling reassembly buffer
#[derive(Debug, Default)]
pub struct FrameReassembler {
    buffer: Vec<u8, BUFFER_CAPACITY>,
}

impl FrameReassembler {
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append newly received bytes
    ///
    /// If the bytes do not fit, everything buffered so far is dropped first.
    pub fn extend(&mut self, bytes: &[u8]) {
        if self.buffer.len() + bytes.len() > BUFFER_CAPACITY {
            log!(
                "[FrameReassembler.extend] buffer full, discarding {} bytes",
                self.buffer.len()
            );
            self.buffer.clear();
        }
        // Only the tail of an oversized chunk can be kept
        let bytes = &bytes[bytes.len().saturating_sub(BUFFER_CAPACITY)..];
        let stored = self.buffer.extend_from_slice(bytes);
        debug_assert!(stored.is_ok(), "reassembly buffer overrun");
    }

    /// Extract the next frame that passes the integrity checks
    ///
    /// Bytes up to the end of the returned unit are removed from the buffer;
    /// everything after it, including unresolved candidates, is kept for the
    /// next call. Returns `None` once nothing further can be recovered from
    /// the buffered bytes.
    pub fn next_extracted(&mut self) -> Option<Extracted> {
        let mut cursor = 0;
        loop {
            let offset = self
                .buffer
                .get(cursor..)?
                .iter()
                .position(|&byte| byte == START_BYTE)?;
            let start = cursor + offset;
            if self.buffer.len() - start < MIN_FRAME_LEN {
                return None;
            }

            match Self::candidate(&self.buffer[start..]) {
                Some(extracted) => {
                    self.consume(start + extracted.len());
                    return Some(extracted);
                }
                None => cursor = start + 1,
            }
        }
    }

    /// Extract the next frame small enough to carry a command
    ///
    /// Oversized frames on the way are consumed and dropped.
    pub fn next_frame(&mut self) -> Option<Frame> {
        loop {
            match self.next_extracted()? {
                Extracted::Frame(frame) => return Some(frame),
                Extracted::Oversized { len, .. } => {
                    log!("[FrameReassembler.next_frame] dropping {} byte frame", len);
                }
            }
        }
    }

    /// Check the frame starting at `bytes[0]`
    fn candidate(bytes: &[u8]) -> Option<Extracted> {
        let len = read_length(bytes)?;
        if len < MIN_FRAME_LEN || bytes.len() < len {
            return None;
        }

        match Frame::decode(&bytes[..len]) {
            Ok(frame) => Some(Extracted::Frame(frame)),
            Err(Error::FrameTooLarge(len)) => Some(Extracted::Oversized {
                handler_id: bytes[HANDLER_OFFSET],
                len,
            }),
            Err(error) => {
                log!("[FrameReassembler.candidate] rejected: {:?}", error);
                None
            }
        }
    }

    /// Remove the first `end` bytes
    fn consume(&mut self, end: usize) {
        let remaining = self.buffer.len() - end;
        self.buffer.copy_within(end.., 0);
        self.buffer.truncate(remaining);
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
