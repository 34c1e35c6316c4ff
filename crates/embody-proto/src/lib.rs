//! The EmBody message layer.
//!
//! One [`Message`] variant per protocol type code, each with a positional
//! body codec; the frame codec wraps bodies in the
//! `type / length / body / crc` envelope and keeps the stream aligned
//! across corrupt frames.
//!
//! The two entry points are [`decode_frame`] and [`encode_message`]. Both
//! are pure: no I/O, no state, no logging. Callers own buffering across
//! frame boundaries and drop `consumed` bytes after every outcome.

pub mod dispatch;
pub mod error;
pub mod frame;
pub mod message;

pub use error::{CodecError, Result};
pub use frame::{
    decode_frame, encode_message, DecodeOutcome, FRAME_CRC_LEN, FRAME_HEADER_LEN, FRAME_OVERHEAD,
    MAX_FRAME_LEN, MIN_FRAME_LEN,
};
pub use message::Message;
