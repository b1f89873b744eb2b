//! Error type for the symbolic layer.

use thiserror::Error;

use surdx_num::NumError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error(transparent)]
    Num(#[from] NumError),

    #[error("non-integer exponent of a multi-term polynomial")]
    NonIntegerPolyExponent,

    #[error("denominator must not be zero")]
    ZeroDenominator,

    #[error("internal error: {0}")]
    Internal(String),
}
