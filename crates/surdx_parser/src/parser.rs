//! Shunting-yard evaluation of the token stream into an expression
//! tree.

use surdx_algebra::{BinOp, ExprNode};
use surdx_num::IntegerBackend;

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{postprocess, tokenize, Spanned, Token};

enum StackOp {
    Paren(usize),
    Op(BinOp, usize),
}

/// `+ - * /` associate left (pop on greater-or-equal), `^` associates
/// right (pop only on strictly greater).
fn pops_before(top: BinOp, incoming: BinOp) -> bool {
    if incoming == BinOp::Pow {
        top.precedence() > incoming.precedence()
    } else {
        top.precedence() >= incoming.precedence()
    }
}

pub fn parse<I: IntegerBackend>(input: &str) -> Result<ExprNode<I>, ParseError> {
    let tokens = postprocess(tokenize(input)?)?;
    if tokens.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyExpression, 0));
    }
    let end = input.len();

    let mut nodes: Vec<ExprNode<I>> = Vec::new();
    let mut ops: Vec<StackOp> = Vec::new();

    fn reduce<I: IntegerBackend>(
        nodes: &mut Vec<ExprNode<I>>,
        op: BinOp,
        pos: usize,
    ) -> Result<(), ParseError> {
        let rhs = nodes
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingOperand, pos))?;
        let lhs = nodes
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingOperand, pos))?;
        nodes.push(ExprNode::op(op, lhs, rhs));
        Ok(())
    }

    for Spanned { token, pos } in tokens {
        match token {
            Token::Digit(f) | Token::Symbol(f) => nodes.push(ExprNode::Frac(f)),
            Token::LParen => ops.push(StackOp::Paren(pos)),
            Token::RParen => loop {
                match ops.pop() {
                    None => return Err(ParseError::new(ParseErrorKind::UnbalancedParen, pos)),
                    Some(StackOp::Paren(_)) => break,
                    Some(StackOp::Op(op, op_pos)) => reduce(&mut nodes, op, op_pos)?,
                }
            },
            Token::Op(incoming) => {
                while let Some(StackOp::Op(top, top_pos)) = ops.last() {
                    if pops_before(*top, incoming) {
                        let (top, top_pos) = (*top, *top_pos);
                        ops.pop();
                        reduce(&mut nodes, top, top_pos)?;
                    } else {
                        break;
                    }
                }
                ops.push(StackOp::Op(incoming, pos));
            }
            Token::Radical(_) => {
                // postprocess rewrites every radical marker
                return Err(ParseError::new(ParseErrorKind::RadicalNeedsNumber, pos));
            }
        }
    }

    while let Some(stack_op) = ops.pop() {
        match stack_op {
            StackOp::Paren(pos) => {
                return Err(ParseError::new(ParseErrorKind::UnbalancedParen, pos))
            }
            StackOp::Op(op, pos) => reduce(&mut nodes, op, pos)?,
        }
    }

    match nodes.len() {
        0 => Err(ParseError::new(ParseErrorKind::EmptyExpression, 0)),
        1 => Ok(nodes.remove(0)),
        _ => Err(ParseError::new(ParseErrorKind::MissingOperator, end)),
    }
}
