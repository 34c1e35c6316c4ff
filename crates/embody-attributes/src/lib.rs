//! The attribute registry and value sub-codec.
//!
//! An attribute is a device state variable addressed by a `u8` id. The id
//! selects an [`AttributeDescriptor`] fixing the value's wire width, its
//! concrete shape and its physical unit. The registry is the sole width
//! authority: message codecs consult it to know how many body bytes a
//! value occupies.

pub mod error;
pub mod registry;
pub mod value;

pub use error::{AttributeError, Result};
pub use registry::{
    decode_attribute, descriptor, encode_attribute, id, AttributeDescriptor, AttributeKind,
    ATTRIBUTES,
};
pub use value::AttributeValue;
