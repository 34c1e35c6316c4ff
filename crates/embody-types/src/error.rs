use embody_wire::WireError;

/// Errors raised while decoding protocol vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A wire primitive failed underneath.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An enumeration code outside the declared set.
    #[error("unknown {name} code 0x{code:02X}")]
    UnknownEnumValue { name: &'static str, code: u8 },
}

pub type Result<T> = std::result::Result<T, TypeError>;
