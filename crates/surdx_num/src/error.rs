//! Error type shared by the numeric tower.

use thiserror::Error;

/// Errors raised by the exact numeric types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("malformed number `{0}`")]
    MalformedNumber(String),

    /// Conversion to a fixed-width integer did not fit.
    #[error("integer overflow in {0}")]
    Overflow(&'static str),

    /// A surd that still carries a nontrivial radical cannot be read back
    /// as a rational.
    #[error("not a rational value")]
    NotRational,

    /// Addition of surds requires equal radicand and index.
    #[error("radicand and index must be the same")]
    RadicalMismatch,

    #[error("exponent must be an integer")]
    NonIntegerExponent,

    #[error("internal error: {0}")]
    Internal(String),
}
