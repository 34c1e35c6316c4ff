//! The frame envelope: `type (u8) | length (u16 BE) | body | crc (u16 BE)`.
//!
//! `length` counts the whole frame, header and checksum included, so the
//! minimum legal frame is 5 bytes. The CRC covers every byte before the
//! checksum field. Decoding never panics and always reports how many input
//! bytes to drop, so a caller can resynchronize after any corruption.

use bytes::{BufMut, Bytes, BytesMut};
use embody_wire::crc16;

use crate::dispatch;
use crate::error::{CodecError, Result};
use crate::message::Message;

/// Type byte plus length field.
pub const FRAME_HEADER_LEN: usize = 3;
/// Trailing checksum width.
pub const FRAME_CRC_LEN: usize = 2;
/// Header and checksum together.
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_LEN + FRAME_CRC_LEN;
/// Smallest legal frame: empty body.
pub const MIN_FRAME_LEN: usize = FRAME_OVERHEAD;
/// Largest frame accepted or produced, by policy.
pub const MAX_FRAME_LEN: usize = 4096;

/// Result of one [`decode_frame`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// At least this many more bytes are required to complete the next
    /// frame; nothing was consumed.
    Need(usize),
    /// A complete, CRC-valid frame decoded; drop `consumed` bytes.
    Frame { message: Message, consumed: usize },
    /// Framing or body decoding failed; drop `consumed` bytes to resync.
    Failed { error: CodecError, consumed: usize },
}

/// Split one frame off the front of `input` and decode it.
///
/// `input` may hold a partial frame, exactly one frame, or several; only
/// the first is examined. Trailing bytes are never touched.
pub fn decode_frame(input: &[u8]) -> DecodeOutcome {
    if input.len() < FRAME_HEADER_LEN {
        return DecodeOutcome::Need(MIN_FRAME_LEN - input.len());
    }

    let declared = usize::from(u16::from_be_bytes([input[1], input[2]]));
    if !(MIN_FRAME_LEN..=MAX_FRAME_LEN).contains(&declared) {
        // drop the header only; the stream may realign inside what we saw
        return DecodeOutcome::Failed {
            error: CodecError::InvalidLength { length: declared },
            consumed: FRAME_HEADER_LEN,
        };
    }

    if input.len() < declared {
        return DecodeOutcome::Need(declared - input.len());
    }

    let frame = &input[..declared];
    let crc_offset = declared - FRAME_CRC_LEN;
    let received = u16::from_be_bytes([frame[crc_offset], frame[crc_offset + 1]]);
    let computed = crc16(&frame[..crc_offset]);
    if computed != received {
        return DecodeOutcome::Failed {
            error: CodecError::CrcMismatch { computed, received },
            consumed: declared,
        };
    }

    // framing is sound from here on: the frame is consumed either way
    match dispatch::decode_body(frame[0], &frame[FRAME_HEADER_LEN..crc_offset]) {
        Ok(message) => DecodeOutcome::Frame {
            message,
            consumed: declared,
        },
        Err(error) => DecodeOutcome::Failed {
            error,
            consumed: declared,
        },
    }
}

/// Encode `message` as one complete frame.
///
/// Validates every invariant first, then writes header, body and CRC into
/// a single exact-size allocation.
pub fn encode_message(message: &Message) -> Result<Bytes> {
    let body_len = message.body_len()?;
    let total = body_len + FRAME_OVERHEAD;
    if total > MAX_FRAME_LEN {
        return Err(CodecError::InvalidLength { length: total });
    }

    let mut frame = BytesMut::with_capacity(total);
    frame.put_u8(message.type_code());
    frame.put_u16(total as u16);
    message.encode_body(&mut frame)?;
    debug_assert_eq!(frame.len(), total - FRAME_CRC_LEN);

    let crc = crc16(&frame);
    frame.put_u16(crc);
    Ok(frame.freeze())
}
