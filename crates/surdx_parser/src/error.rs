//! Parse errors with byte positions and caret rendering.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("malformed number `{0}`")]
    MalformedNumber(String),

    #[error("operator is missing an operand")]
    MissingOperand,

    #[error("expected an operator between operands")]
    MissingOperator,

    #[error("unbalanced parenthesis")]
    UnbalancedParen,

    #[error("a radical must be followed by a number")]
    RadicalNeedsNumber,

    #[error("empty expression")]
    EmptyExpression,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the source line.
    pub pos: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, pos: usize) -> Self {
        ParseError { kind, pos }
    }

    /// Render the source line with a caret under the offending spot.
    pub fn render(&self, input: &str) -> String {
        let col = self.pos.min(input.len());
        format!("{input}\n{}^ {}", " ".repeat(col), self.kind)
    }
}
