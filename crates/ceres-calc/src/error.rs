//! Error type for the calc interpreter.

use thiserror::Error;

/// Failures raised by the calc engine and its value codec.
#[derive(Debug, Error)]
pub enum CalcError {
    /// An identifier was read before anything was bound under its name.
    #[error("object `{0}` not found")]
    Undefined(String),

    /// An operand had the wrong type for the requested operation.
    #[error("non-numeric operand: {0}")]
    Type(String),

    /// The source text could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Element-wise arithmetic over vectors of different lengths.
    #[error("vector lengths differ: {0} vs {1}")]
    Length(usize, usize),

    /// The value codec rejected its input.
    #[error("value codec failed: {0}")]
    Codec(String),
}
