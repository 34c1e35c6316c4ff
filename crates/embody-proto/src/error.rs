use embody_attributes::AttributeError;
use embody_types::TypeError;
use embody_wire::WireError;

/// Errors raised by the message and frame codecs.
///
/// The lower layers surface through the transparent variants, so one match
/// covers the whole taxonomy: truncation and trailing garbage arrive as
/// [`WireError`], unknown enum codes as [`TypeError`], unknown attribute
/// ids as [`AttributeError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The frame length header is outside the legal range.
    #[error("frame length {length} out of range")]
    InvalidLength { length: usize },

    /// The frame checksum does not match its content.
    #[error("crc mismatch: computed 0x{computed:04X}, frame carries 0x{received:04X}")]
    CrcMismatch { computed: u16, received: u16 },

    /// The type code is not in the dispatch table.
    #[error("unknown message type 0x{0:02X}")]
    UnknownMessageType(u8),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
