//! Expression parsing for surdx.
//!
//! Two phases: a lexer that produces operator/paren/operand/radical
//! tokens (folding leading signs into literals), a rewrite pass for
//! `_n/r` radicals and implicit multiplication, and a shunting-yard
//! evaluator that builds the expression tree.

pub mod error;
mod parser;
pub mod token;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
