/// Errors raised by the wire primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The input ended in the middle of a field.
    #[error("input truncated: {needed} more byte(s) required")]
    Truncated { needed: usize },

    /// The body carried more bytes than the layout consumes.
    #[error("{remaining} trailing byte(s) after the last field")]
    TrailingGarbage { remaining: usize },

    /// An encoder was given a value that does not fit its wire field.
    #[error("{context}: value out of range for the wire field")]
    OutOfRange { context: &'static str },

    /// A string field contained bytes outside printable ASCII.
    #[error("{context}: not valid ASCII")]
    InvalidAscii { context: &'static str },
}

pub type Result<T> = std::result::Result<T, WireError>;
