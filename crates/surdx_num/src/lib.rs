//! Exact numeric tower: arbitrary-precision integers, rationals,
//! integer factorization and normalized surds.
//!
//! The tower is generic over [`IntegerBackend`]; the [`Int`] alias
//! picks the build-time backend (`backend-i64`, `backend-i128`,
//! `backend-bignum`).

pub mod backend;
pub mod bignum;
pub mod error;
pub mod factor;
pub mod rational;
pub mod surd;

pub use backend::IntegerBackend;
pub use bignum::BigInt;
pub use error::NumError;
pub use factor::{factorize, is_prime};
pub use rational::Rational;
pub use surd::{nth_root, Surd};

#[cfg(feature = "backend-bignum")]
pub type Int = BigInt;

#[cfg(all(feature = "backend-i128", not(feature = "backend-bignum")))]
pub type Int = i128;

#[cfg(all(
    feature = "backend-i64",
    not(any(feature = "backend-i128", feature = "backend-bignum"))
))]
pub type Int = i64;

#[cfg(not(any(
    feature = "backend-i64",
    feature = "backend-i128",
    feature = "backend-bignum"
)))]
pub type Int = i64;
