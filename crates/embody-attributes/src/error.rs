use embody_types::TypeError;
use embody_wire::WireError;

/// Errors raised by the attribute sub-codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// The attribute id is not in the registry.
    #[error("unknown attribute id 0x{0:02X}")]
    UnknownAttribute(u8),

    /// The value handed to the encoder does not have the descriptor's shape.
    #[error("attribute 0x{id:02X} ({name}) cannot encode the supplied value kind")]
    ValueMismatch { id: u8, name: &'static str },

    /// A vocabulary or wire failure underneath.
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl From<WireError> for AttributeError {
    fn from(err: WireError) -> Self {
        AttributeError::Type(TypeError::Wire(err))
    }
}

pub type Result<T> = std::result::Result<T, AttributeError>;
