//! Expression trees: fraction leaves under binary operator nodes.
//!
//! Normalization folds every fully-evaluable subtree into a single
//! fraction leaf; a tree with free symbols keeps its operator spine
//! above the spots that cannot fold (symbolic exponents, mostly).

use std::fmt;

use log::debug;
use rustc_hash::FxHashMap;

use surdx_num::IntegerBackend;

use crate::error::AlgebraError;
use crate::fraction::Fraction;
use crate::Environment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '^' => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }

    pub fn precedence(self) -> u32 {
        match self {
            BinOp::Add | BinOp::Sub => 10,
            BinOp::Mul | BinOp::Div => 100,
            BinOp::Pow => 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode<I: IntegerBackend> {
    Frac(Fraction<I>),
    Op {
        op: BinOp,
        lhs: Box<ExprNode<I>>,
        rhs: Box<ExprNode<I>>,
    },
}

impl<I: IntegerBackend> ExprNode<I> {
    pub fn op(op: BinOp, lhs: ExprNode<I>, rhs: ExprNode<I>) -> Self {
        ExprNode::Op {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn as_fraction(&self) -> Option<&Fraction<I>> {
        match self {
            ExprNode::Frac(f) => Some(f),
            ExprNode::Op { .. } => None,
        }
    }

    /// Bottom-up fold. `Ok(None)` means the subtree is not evaluable
    /// (a symbolic exponent somewhere); arithmetic failures are real
    /// errors.
    pub fn try_eval(&self) -> Result<Option<Fraction<I>>, AlgebraError> {
        match self {
            ExprNode::Frac(f) => Ok(Some(f.clone())),
            ExprNode::Op { op, lhs, rhs } => {
                let (Some(a), Some(b)) = (lhs.try_eval()?, rhs.try_eval()?) else {
                    return Ok(None);
                };
                let folded = match op {
                    BinOp::Add => a.add(&b)?,
                    BinOp::Sub => a.sub(&b)?,
                    BinOp::Mul => a.mul(&b)?,
                    BinOp::Div => a.div(&b)?,
                    BinOp::Pow => {
                        // The exponent must fold to a rational.
                        let exponent = b.try_to_surd().and_then(|s| s.to_rational().ok());
                        match exponent {
                            Some(p) => a.pow(&p)?,
                            None => return Ok(None),
                        }
                    }
                };
                Ok(Some(folded))
            }
        }
    }

    /// Replace every foldable operator node by its fraction.
    pub fn normalize(self) -> Result<Self, AlgebraError> {
        match self {
            ExprNode::Frac(f) => Ok(ExprNode::Frac(f)),
            ExprNode::Op { op, lhs, rhs } => {
                let node = ExprNode::Op {
                    op,
                    lhs: Box::new(lhs.normalize()?),
                    rhs: Box::new(rhs.normalize()?),
                };
                match node.try_eval()? {
                    Some(f) => Ok(ExprNode::Frac(f)),
                    None => {
                        debug!("subtree kept symbolic under '{}'", op.as_char());
                        Ok(node)
                    }
                }
            }
        }
    }

    /// Substitute symbols from the environment at every leaf, then
    /// re-normalize.
    pub fn substitute(&self, env: &Environment<I>) -> Result<Self, AlgebraError> {
        self.substitute_leaves(env)?.normalize()
    }

    fn substitute_leaves(&self, env: &Environment<I>) -> Result<Self, AlgebraError> {
        match self {
            ExprNode::Frac(f) => Ok(ExprNode::Frac(f.substitute(env)?)),
            ExprNode::Op { op, lhs, rhs } => Ok(ExprNode::Op {
                op: *op,
                lhs: Box::new(lhs.substitute_leaves(env)?),
                rhs: Box::new(rhs.substitute_leaves(env)?),
            }),
        }
    }

    /// Approximate value with every remaining symbol looked up in the
    /// constants map.
    pub fn eval_f64(&self, consts: &FxHashMap<String, f64>) -> Option<f64> {
        match self {
            ExprNode::Frac(f) => f.eval_f64(consts),
            ExprNode::Op { op, lhs, rhs } => {
                let a = lhs.eval_f64(consts)?;
                let b = rhs.eval_f64(consts)?;
                Some(match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => a.powf(b),
                })
            }
        }
    }

    fn needs_parens(&self, parent: BinOp, right_side: bool) -> bool {
        let child = match self {
            // A compound leaf (a sum, a fraction, a radical with a
            // coefficient) binds weaker than any operator around it.
            ExprNode::Frac(f) => {
                return !f.is_atomic()
                    && (parent.precedence() > BinOp::Add.precedence()
                        || (right_side && parent == BinOp::Sub));
            }
            ExprNode::Op { op, .. } => *op,
        };
        if parent == BinOp::Pow {
            return true;
        }
        if right_side {
            match parent {
                BinOp::Sub => child.precedence() <= BinOp::Sub.precedence(),
                BinOp::Mul => child.precedence() < BinOp::Mul.precedence(),
                BinOp::Div => child.precedence() <= BinOp::Div.precedence(),
                _ => false,
            }
        } else {
            child.precedence() < parent.precedence()
        }
    }
}

impl<I: IntegerBackend> fmt::Display for ExprNode<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Frac(frac) => write!(f, "{frac}"),
            ExprNode::Op { op, lhs, rhs } => {
                if lhs.needs_parens(*op, false) {
                    write!(f, "({lhs})")?;
                } else {
                    write!(f, "{lhs}")?;
                }
                match op {
                    BinOp::Add => write!(f, " + ")?,
                    BinOp::Sub => write!(f, " - ")?,
                    _ => write!(f, "{}", op.as_char())?,
                }
                if rhs.needs_parens(*op, true) {
                    write!(f, "({rhs})")
                } else {
                    write!(f, "{rhs}")
                }
            }
        }
    }
}
