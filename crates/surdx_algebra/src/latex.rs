//! LaTeX rendering for the whole tower.

use surdx_num::{IntegerBackend, Rational, Surd};

use crate::fraction::Fraction;
use crate::node::{BinOp, ExprNode};
use crate::poly::Poly;
use crate::term::Term;

pub trait ToTex {
    fn to_tex(&self) -> String;
}

impl<I: IntegerBackend> ToTex for Rational<I> {
    fn to_tex(&self) -> String {
        if self.is_integer() {
            self.numerator().to_string()
        } else if self.is_negative() {
            format!(
                "-\\frac{{{}}}{{{}}}",
                self.neg().numerator(),
                self.denominator()
            )
        } else {
            format!("\\frac{{{}}}{{{}}}", self.numerator(), self.denominator())
        }
    }
}

impl<I: IntegerBackend> ToTex for Surd<I> {
    fn to_tex(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if self.index() == 1 {
            return self.coe().to_tex();
        }
        let radical = if self.index() == 2 {
            format!("\\sqrt{{{}}}", self.radicand())
        } else {
            format!("\\sqrt[{}]{{{}}}", self.index(), self.radicand())
        };
        if self.coe().is_one() {
            radical
        } else if *self.coe() == Rational::from_i64(-1) {
            format!("-{radical}")
        } else {
            format!("{}{}", self.coe().to_tex(), radical)
        }
    }
}

impl<I: IntegerBackend> ToTex for Term<I> {
    fn to_tex(&self) -> String {
        if self.coe().is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        if self.symbols().is_empty() {
            return self.coe().to_tex();
        }
        if *self.coe() == Surd::from_i64(-1) {
            out.push('-');
        } else if !self.coe().is_one() {
            out.push_str(&self.coe().to_tex());
        }
        for (name, exp) in self.symbols() {
            let base = if name.chars().count() == 1 {
                name.clone()
            } else {
                format!("\\mathrm{{{name}}}")
            };
            if exp.is_one() {
                out.push_str(&base);
            } else {
                out.push_str(&format!("{base}^{{{}}}", exp));
            }
        }
        out
    }
}

impl<I: IntegerBackend> ToTex for Poly<I> {
    fn to_tex(&self) -> String {
        if self.terms().is_empty() {
            return "0".to_string();
        }
        let mut out = String::new();
        for (i, term) in self.terms().iter().enumerate() {
            if i == 0 {
                out.push_str(&term.to_tex());
            } else if term.coe().is_negative() {
                out.push_str(" - ");
                out.push_str(&term.neg().to_tex());
            } else {
                out.push_str(" + ");
                out.push_str(&term.to_tex());
            }
        }
        out
    }
}

impl<I: IntegerBackend> ToTex for Fraction<I> {
    fn to_tex(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if self.denominator().is_one() {
            return self.numerator().to_tex();
        }
        format!(
            "\\frac{{{}}}{{{}}}",
            self.numerator().to_tex(),
            self.denominator().to_tex()
        )
    }
}

impl<I: IntegerBackend> ToTex for ExprNode<I> {
    fn to_tex(&self) -> String {
        match self {
            ExprNode::Frac(f) => f.to_tex(),
            ExprNode::Op { op, lhs, rhs } => {
                let l = lhs.to_tex();
                let r = rhs.to_tex();
                match op {
                    BinOp::Add => format!("{l} + {r}"),
                    BinOp::Sub => format!("{l} - \\left({r}\\right)"),
                    BinOp::Mul => format!("\\left({l}\\right) \\cdot \\left({r}\\right)"),
                    BinOp::Div => format!("\\frac{{{l}}}{{{r}}}"),
                    BinOp::Pow => format!("\\left({l}\\right)^{{{r}}}"),
                }
            }
        }
    }
}
