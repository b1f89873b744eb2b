//! Polynomials: sorted term lists with like-term merging and
//! multinomial integer powers.

use std::fmt;

use num_traits::One;
use rustc_hash::FxHashMap;

use surdx_num::{IntegerBackend, NumError, Rational, Surd};

use crate::error::AlgebraError;
use crate::term::Term;
use crate::Environment;

/// Sum of terms. Normalization keeps the list sorted by the term
/// order, merges adjacent like terms and drops zero coefficients, so
/// the canonical zero is the empty list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly<I: IntegerBackend> {
    terms: Vec<Term<I>>,
}

impl<I: IntegerBackend> Poly<I> {
    pub fn new(terms: Vec<Term<I>>) -> Self {
        let mut p = Poly { terms };
        p.normalize();
        p
    }

    pub fn zero() -> Self {
        Poly { terms: Vec::new() }
    }

    pub fn one() -> Self {
        Poly::from_surd(Surd::one())
    }

    pub fn from_term(t: Term<I>) -> Self {
        Poly::new(vec![t])
    }

    pub fn from_surd(s: Surd<I>) -> Self {
        Poly::new(vec![Term::from_surd(s)])
    }

    pub fn terms(&self) -> &[Term<I>] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].is_symbol_free() && self.terms[0].coe().is_one()
    }

    fn normalize(&mut self) {
        self.terms.sort();
        let mut merged: Vec<Term<I>> = Vec::with_capacity(self.terms.len());
        for term in self.terms.drain(..) {
            match merged.last_mut() {
                Some(last) if last.is_like(&term) => {
                    // Like terms share the radical part, so the
                    // coefficient addition cannot mismatch.
                    if let Ok(sum) = last.coe().checked_add(term.coe()) {
                        let symbols = last.symbols().clone();
                        *last = Term::new(sum, symbols);
                    }
                }
                _ => merged.push(term),
            }
        }
        merged.retain(|t| !t.is_zero());
        self.terms = merged;
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Poly::new(terms)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn neg(&self) -> Self {
        Poly {
            terms: self.terms.iter().map(Term::neg).collect(),
        }
    }

    /// Cartesian product of the term lists.
    pub fn mul(&self, other: &Self) -> Result<Self, NumError> {
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(a.mul(b)?);
            }
        }
        Ok(Poly::new(terms))
    }

    pub fn div_surd(&self, divisor: &Surd<I>) -> Result<Self, NumError> {
        let terms = self
            .terms
            .iter()
            .map(|t| t.div_surd(divisor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Poly::new(terms))
    }

    /// Polynomial power. Single terms take any rational exponent; a
    /// multi-term base requires a non-negative integer and expands by
    /// the multinomial theorem.
    pub fn pow(&self, exp: &Rational<I>) -> Result<Self, AlgebraError> {
        if exp.is_zero() {
            return Ok(Poly::one());
        }
        if exp.is_one() {
            return Ok(self.clone());
        }
        if self.terms.len() == 1 {
            return Ok(Poly::from_term(self.terms[0].pow(exp)?));
        }
        if !exp.is_integer() {
            return Err(AlgebraError::NonIntegerPolyExponent);
        }
        let k = exp
            .numerator()
            .to_u32()
            .ok_or(NumError::Overflow("polynomial exponent"))?;

        // Multinomial theorem: every composition a1 + … + am = k
        // contributes k!/Π ai! · Π ti^ai.
        let fact = factorial_table::<I>(k);
        let m = self.terms.len();
        let mut composition = vec![0u32; m];
        let mut out: Vec<Term<I>> = Vec::new();
        let mut err: Option<NumError> = None;
        enumerate_compositions(k, m, &mut composition, &mut |comp| {
            if err.is_some() {
                return;
            }
            let build = || -> Result<Term<I>, NumError> {
                let coeff = multinomial_coeff(&fact, k, comp);
                let mut term = Term::from_surd(Surd::from_rational(Rational::from_int(coeff)));
                for (t, &a) in self.terms.iter().zip(comp.iter()) {
                    if a > 0 {
                        term = term.mul(&t.pow_u32(a)?)?;
                    }
                }
                Ok(term)
            };
            match build() {
                Ok(t) => out.push(t),
                Err(e) => err = Some(e),
            }
        });
        if let Some(e) = err {
            return Err(e.into());
        }
        Ok(Poly::new(out))
    }

    /// Collapse to a single surd. `None` when a symbol is left or the
    /// surd parts cannot be combined into one radical.
    pub fn try_to_surd(&self) -> Option<Surd<I>> {
        let mut acc = Surd::zero();
        for t in &self.terms {
            acc = acc.checked_add(&t.try_to_surd()?).ok()?;
        }
        Some(acc)
    }

    pub fn is_symbol_free(&self) -> bool {
        self.terms.iter().all(Term::is_symbol_free)
    }

    pub fn substitute(&self, env: &Environment<I>) -> Result<Self, NumError> {
        let terms = self
            .terms
            .iter()
            .map(|t| t.substitute(env))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Poly::new(terms))
    }

    pub fn eval_f64(&self, consts: &FxHashMap<String, f64>) -> Option<f64> {
        let mut sum = 0.0;
        for t in &self.terms {
            sum += t.eval_f64(consts)?;
        }
        Some(sum)
    }
}

fn factorial_table<I: IntegerBackend>(k: u32) -> Vec<I> {
    let mut fact = Vec::with_capacity(k as usize + 1);
    fact.push(I::one());
    for i in 1..=k {
        let prev = fact[fact.len() - 1].clone();
        fact.push(prev * I::from_u32(i));
    }
    fact
}

/// `k! / (a1! · a2! · … · am!)`.
fn multinomial_coeff<I: IntegerBackend>(fact: &[I], k: u32, comp: &[u32]) -> I {
    let mut denom = I::one();
    for &a in comp {
        denom = denom * fact[a as usize].clone();
    }
    fact[k as usize].clone() / denom
}

/// Enumerate the non-negative integer solutions of a1 + … + am = k.
fn enumerate_compositions<F: FnMut(&[u32])>(k: u32, m: usize, buf: &mut [u32], f: &mut F) {
    debug_assert_eq!(buf.len(), m);
    enumerate_rec(k, m, 0, buf, f);
}

fn enumerate_rec<F: FnMut(&[u32])>(remaining: u32, m: usize, pos: usize, buf: &mut [u32], f: &mut F) {
    if pos == m - 1 {
        buf[pos] = remaining;
        f(buf);
        return;
    }
    for v in 0..=remaining {
        buf[pos] = v;
        enumerate_rec(remaining - v, m, pos + 1, buf, f);
    }
}

impl<I: IntegerBackend> fmt::Display for Poly<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for term in &self.terms {
            if first {
                write!(f, "{term}")?;
                first = false;
            } else if term.coe().is_negative() {
                write!(f, " - {}", term.neg())?;
            } else {
                write!(f, " + {term}")?;
            }
        }
        Ok(())
    }
}
