//! A term: surd coefficient times a product of symbols raised to
//! rational exponents.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use surdx_num::{IntegerBackend, NumError, Rational, Surd};

use crate::Environment;

/// `coe · Π symbol^exponent`. Symbols with exponent zero are pruned on
/// construction, so an empty map means the term is a bare surd.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term<I: IntegerBackend> {
    coe: Surd<I>,
    symbols: BTreeMap<String, Rational<I>>,
}

impl<I: IntegerBackend> Term<I> {
    pub fn new(coe: Surd<I>, symbols: BTreeMap<String, Rational<I>>) -> Self {
        let symbols = symbols.into_iter().filter(|(_, e)| !e.is_zero()).collect();
        Term { coe, symbols }
    }

    pub fn from_surd(coe: Surd<I>) -> Self {
        Term {
            coe,
            symbols: BTreeMap::new(),
        }
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        let mut symbols = BTreeMap::new();
        symbols.insert(name.into(), Rational::one());
        Term {
            coe: Surd::one(),
            symbols,
        }
    }

    pub fn coe(&self) -> &Surd<I> {
        &self.coe
    }

    pub fn symbols(&self) -> &BTreeMap<String, Rational<I>> {
        &self.symbols
    }

    pub fn is_symbol_free(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coe.is_zero()
    }

    /// Like terms share the symbol map and the radical part of the
    /// coefficient; only those may be merged by coefficient addition.
    pub fn is_like(&self, other: &Self) -> bool {
        self.symbols == other.symbols && self.coe.radical_part_eq(other.coe())
    }

    pub fn mul(&self, other: &Self) -> Result<Self, NumError> {
        let mut symbols = self.symbols.clone();
        for (name, exp) in &other.symbols {
            match symbols.get_mut(name) {
                Some(e) => *e = e.add(exp),
                None => {
                    symbols.insert(name.clone(), exp.clone());
                }
            }
        }
        Ok(Term::new(self.coe.mul(other.coe())?, symbols))
    }

    pub fn div_surd(&self, divisor: &Surd<I>) -> Result<Self, NumError> {
        Ok(Term {
            coe: self.coe.div(divisor)?,
            symbols: self.symbols.clone(),
        })
    }

    /// Raise coefficient and every symbol exponent by `p`.
    pub fn pow(&self, p: &Rational<I>) -> Result<Self, NumError> {
        let symbols = self
            .symbols
            .iter()
            .map(|(name, exp)| (name.clone(), exp.mul(p)))
            .collect();
        Ok(Term::new(self.coe.pow(p)?, symbols))
    }

    pub fn pow_u32(&self, k: u32) -> Result<Self, NumError> {
        self.pow(&Rational::from_i64(k as i64))
    }

    pub fn neg(&self) -> Self {
        Term {
            coe: self.coe.neg(),
            symbols: self.symbols.clone(),
        }
    }

    /// Fold every symbol present in the environment into the
    /// coefficient.
    pub fn substitute(&self, env: &Environment<I>) -> Result<Self, NumError> {
        let mut coe = self.coe.clone();
        let mut symbols = BTreeMap::new();
        for (name, exp) in &self.symbols {
            match env.get(name) {
                Some(value) => coe = coe.mul(&value.pow(exp)?)?,
                None => {
                    symbols.insert(name.clone(), exp.clone());
                }
            }
        }
        Ok(Term { coe, symbols })
    }

    /// A symbol-free term is just its coefficient.
    pub fn try_to_surd(&self) -> Option<Surd<I>> {
        if self.symbols.is_empty() {
            Some(self.coe.clone())
        } else {
            None
        }
    }

    /// Numeric value against a constants map; any unmapped symbol
    /// fails the evaluation.
    pub fn eval_f64(&self, consts: &FxHashMap<String, f64>) -> Option<f64> {
        let mut v = self.coe.to_f64();
        for (name, exp) in &self.symbols {
            let base = consts.get(name)?;
            v *= base.powf(exp.to_f64());
        }
        Some(v)
    }

    fn total_degree(&self) -> Rational<I> {
        self.symbols
            .values()
            .fold(Rational::zero(), |acc, e| acc.add(e))
    }
}

impl<I: IntegerBackend> PartialOrd for Term<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: IntegerBackend> Ord for Term<I> {
    /// The polynomial order: symbol maps first (decreasing total
    /// degree, then lexicographic with higher exponents first), then
    /// the coefficient's index, radicand and rational value. Like
    /// terms always end up adjacent.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total_degree()
            .cmp(&self.total_degree())
            .then_with(|| {
                let mut a = self.symbols.iter();
                let mut b = other.symbols.iter();
                loop {
                    match (a.next(), b.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Greater,
                        (Some(_), None) => return Ordering::Less,
                        (Some((an, ae)), Some((bn, be))) => {
                            let ord = an.cmp(bn).then(be.cmp(ae));
                            if ord != Ordering::Equal {
                                return ord;
                            }
                        }
                    }
                }
            })
            .then_with(|| self.coe.index().cmp(&other.coe.index()))
            .then_with(|| self.coe.radicand().cmp(other.coe.radicand()))
            .then_with(|| self.coe.coe().cmp(other.coe.coe()))
    }
}

impl<I: IntegerBackend> fmt::Display for Term<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coe.is_zero() {
            return write!(f, "0");
        }
        let mut wrote_coe = false;
        if self.symbols.is_empty() {
            return write!(f, "{}", self.coe);
        }
        if self.coe == Surd::from_i64(-1) {
            write!(f, "-")?;
        } else if !self.coe.is_one() {
            if self.coe.is_rational() && !self.coe.coe().is_integer() {
                write!(f, "({})", self.coe)?;
            } else {
                write!(f, "{}", self.coe)?;
            }
            wrote_coe = true;
        }
        let mut first = true;
        for (name, exp) in &self.symbols {
            if wrote_coe || !first {
                write!(f, "*")?;
            }
            first = false;
            if name.chars().count() == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{{{name}}}")?;
            }
            if !exp.is_one() {
                if exp.is_integer() && !exp.is_negative() {
                    write!(f, "^{exp}")?;
                } else {
                    write!(f, "^({exp})")?;
                }
            }
        }
        Ok(())
    }
}
