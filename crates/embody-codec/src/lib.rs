//! Codec for the EmBody/HyperSension wearable device protocol.
//!
//! A pure `bytes <-> message` translation layer for the length-prefixed,
//! CRC-checked binary framing spoken between a host and a body-worn sensor
//! over a reliable byte stream. Transport, buffering across reads and
//! session logic stay with the caller.
//!
//! # Crate Structure
//!
//! - [`wire`] — big-endian cursor, CRC-16, write helpers
//! - [`types`] — bounded enums, packed complex types, units and scaling
//! - [`attributes`] — the attribute registry and value sub-codec
//! - [`proto`] — typed messages, the frame codec and type-code dispatch
//!
//! # Decoding a stream
//!
//! ```
//! use embody_codec::proto::{decode_frame, DecodeOutcome};
//!
//! let mut buf: Vec<u8> = vec![0x01, 0x00, 0x05, 0xAB, 0x09]; // heartbeat
//! match decode_frame(&buf) {
//!     DecodeOutcome::Frame { message, consumed } => {
//!         buf.drain(..consumed);
//!         println!("{message:?}");
//!     }
//!     DecodeOutcome::Need(_n) => { /* read at least _n more bytes */ }
//!     DecodeOutcome::Failed { consumed, .. } => {
//!         buf.drain(..consumed); // resynchronize and carry on
//!     }
//! }
//! ```

/// Re-export wire primitives.
pub mod wire {
    pub use embody_wire::*;
}

/// Re-export protocol vocabulary.
pub mod types {
    pub use embody_types::*;
}

/// Re-export the attribute registry and sub-codec.
pub mod attributes {
    pub use embody_attributes::*;
}

/// Re-export the message layer.
pub mod proto {
    pub use embody_proto::*;
}
