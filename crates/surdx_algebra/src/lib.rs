//! Symbolic layer over the exact numeric tower: terms, polynomials,
//! polynomial fractions and expression trees, plus the plain/LaTeX
//! printers.

pub mod error;
pub mod fraction;
pub mod latex;
pub mod node;
pub mod poly;
pub mod term;

use rustc_hash::FxHashMap;

use surdx_num::{IntegerBackend, Surd};

pub use error::AlgebraError;
pub use fraction::Fraction;
pub use latex::ToTex;
pub use node::{BinOp, ExprNode};
pub use poly::Poly;
pub use term::Term;

/// Exact substitution environment, shared immutably for the duration
/// of one substitute/evaluate call.
pub type Environment<I> = FxHashMap<String, Surd<I>>;

/// Numeric evaluation environment (constants like pi and e).
pub type NumericEnvironment = FxHashMap<String, f64>;
