//! REPL core for the surdx binary, split from `main` so the command
//! surface is testable without a terminal.

pub mod float;
pub mod repl;

pub use repl::{Repl, ReplMsg, ReplOutcome};
