//! Wire primitives for the EmBody protocol.
//!
//! Everything multi-byte on the wire is big-endian. This crate provides:
//! - A bounds-checked read [`Cursor`] over a borrowed byte slice
//! - A [`WireWrite`] extension for the odd-width writes (48-bit timestamps)
//! - The frame CRC ([`crc16`])
//!
//! No I/O, no allocation on the read path.

pub mod crc;
pub mod cursor;
pub mod error;

pub use crc::{crc16, CRC16_INIT, CRC16_POLY};
pub use cursor::{Cursor, WireWrite, U48_MAX};
pub use error::{Result, WireError};
