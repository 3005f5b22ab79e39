use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// No symbols to build a tree from.
    #[error("Empty input: no symbols to build a tree from")]
    EmptyInput,

    /// Bit-string does not match the tree it is being decoded against.
    #[error("Malformed input at bit {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    #[error("Invalid bit {found:?} at position {position}, expected '0' or '1'")]
    InvalidBit { position: usize, found: char },

    #[error("Symbol {0:?} not in code table")]
    UnknownSymbol(char),

    /// Builder or pipeline bug. Never expected to surface.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
