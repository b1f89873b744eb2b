//! Polynomial fractions.
//!
//! Normalization clears fractional coefficients by the lcm of every
//! coefficient denominator, then divides both sides by a shared
//! integer factor. The gcd scan bails out as soon as a cross-pair gcd
//! stops dividing the running factor, leaving the fraction cleared
//! but unreduced.

use std::fmt;

use num_traits::{One, Zero};
use rustc_hash::FxHashMap;

use surdx_num::{IntegerBackend, NumError, Rational, Surd};

use crate::error::AlgebraError;
use crate::poly::Poly;
use crate::term::Term;
use crate::Environment;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fraction<I: IntegerBackend> {
    num: Poly<I>,
    den: Poly<I>,
}

impl<I: IntegerBackend> Fraction<I> {
    pub fn new(num: Poly<I>, den: Poly<I>) -> Result<Self, AlgebraError> {
        if den.is_zero() {
            return Err(AlgebraError::ZeroDenominator);
        }
        let mut f = Fraction { num, den };
        f.reduce()?;
        Ok(f)
    }

    pub fn from_poly(num: Poly<I>) -> Self {
        Fraction {
            num,
            den: Poly::one(),
        }
        .reduced_infallible()
    }

    pub fn from_surd(s: Surd<I>) -> Self {
        Fraction::from_poly(Poly::from_surd(s))
    }

    pub fn from_rational(q: Rational<I>) -> Self {
        Fraction::from_surd(Surd::from_rational(q))
    }

    pub fn from_i64(v: i64) -> Self {
        Fraction::from_rational(Rational::from_i64(v))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Fraction {
            num: Poly::from_term(Term::symbol(name)),
            den: Poly::one(),
        }
    }

    fn reduced_infallible(mut self) -> Self {
        // A nonzero single-term denominator cannot fail to reduce.
        let _ = self.reduce();
        self
    }

    pub fn numerator(&self) -> &Poly<I> {
        &self.num
    }

    pub fn denominator(&self) -> &Poly<I> {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn reduce(&mut self) -> Result<(), AlgebraError> {
        if self.num.is_zero() {
            self.den = Poly::one();
            return Ok(());
        }

        // Clear fractional coefficients on both sides.
        let mut l = I::one();
        for t in self.num.terms().iter().chain(self.den.terms()) {
            l = l.lcm(t.coe().coe().denominator());
        }
        if !l.is_one() {
            let scale = Poly::from_surd(Surd::from_rational(Rational::from_int(l)));
            self.num = self.num.mul(&scale)?;
            self.den = self.den.mul(&scale)?;
        }

        let coe_int = |t: &Term<I>| t.coe().coe().numerator().abs();

        // Shared integer factor, scanned pairwise against the
        // denominator's tail; a cross-pair gcd that does not divide
        // the running factor aborts the reduction.
        let mut g = coe_int(&self.num.terms()[0]).gcd(&coe_int(&self.den.terms()[0]));
        for n in self.num.terms() {
            for d in &self.den.terms()[1..] {
                let new_g = coe_int(n).gcd(&coe_int(d));
                if (g.clone() % new_g.clone()).is_zero() {
                    g = new_g;
                } else {
                    return Ok(());
                }
            }
        }
        if g.is_one() {
            return Ok(());
        }
        let divides_all = self
            .num
            .terms()
            .iter()
            .chain(self.den.terms())
            .all(|t| (coe_int(t) % g.clone()).is_zero());
        if divides_all {
            let shared = Surd::from_rational(Rational::from_int(g));
            self.num = self.num.div_surd(&shared)?;
            self.den = self.den.div_surd(&shared)?;
        }
        Ok(())
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        if self.den == rhs.den {
            return Fraction::new(self.num.add(&rhs.num), self.den.clone());
        }
        let num = self.num.mul(&rhs.den)?.add(&rhs.num.mul(&self.den)?);
        let den = self.den.mul(&rhs.den)?;
        Fraction::new(num, den)
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.add(&rhs.neg())
    }

    pub fn neg(&self) -> Self {
        Fraction {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub fn mul(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        Fraction::new(self.num.mul(&rhs.num)?, self.den.mul(&rhs.den)?)
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        if rhs.num.is_zero() {
            return Err(NumError::DivisionByZero.into());
        }
        Fraction::new(self.num.mul(&rhs.den)?, self.den.mul(&rhs.num)?)
    }

    pub fn reciprocal(&self) -> Result<Self, AlgebraError> {
        if self.num.is_zero() {
            return Err(NumError::DivisionByZero.into());
        }
        Fraction::new(self.den.clone(), self.num.clone())
    }

    /// Raise to a rational power. Negative integer exponents go
    /// through the reciprocal; fractional exponents are only defined
    /// where the polynomial power is (single terms, or bases that
    /// collapse to surds).
    pub fn pow(&self, exp: &Rational<I>) -> Result<Self, AlgebraError> {
        if exp.is_integer() && exp.is_negative() {
            return self.reciprocal()?.pow(&exp.neg());
        }
        Fraction::new(self.num.pow(exp)?, self.den.pow(exp)?)
    }

    /// Collapse to a single surd when both sides do.
    pub fn try_to_surd(&self) -> Option<Surd<I>> {
        let n = self.num.try_to_surd()?;
        let d = self.den.try_to_surd()?;
        n.div(&d).ok()
    }

    pub fn no_symbols(&self) -> bool {
        self.num.is_symbol_free() && self.den.is_symbol_free()
    }

    /// Renders as a single token (a bare non-negative integer or a
    /// bare symbol), so it never needs parentheses inside a larger
    /// expression.
    pub fn is_atomic(&self) -> bool {
        if !self.den.is_one() || self.num.terms().len() != 1 {
            return false;
        }
        let t = &self.num.terms()[0];
        if t.is_symbol_free() {
            let c = t.coe();
            return c.is_rational() && c.coe().is_integer() && !c.coe().is_negative();
        }
        t.symbols().len() == 1
            && t.coe().is_one()
            && t.symbols().values().all(Rational::is_one)
    }

    pub fn is_rational(&self) -> bool {
        self.try_to_surd().map_or(false, |s| s.is_rational())
    }

    pub fn substitute(&self, env: &Environment<I>) -> Result<Self, AlgebraError> {
        Fraction::new(self.num.substitute(env)?, self.den.substitute(env)?)
    }

    pub fn eval_f64(&self, consts: &FxHashMap<String, f64>) -> Option<f64> {
        let n = self.num.eval_f64(consts)?;
        let d = self.den.eval_f64(consts)?;
        if d == 0.0 {
            return None;
        }
        Some(n / d)
    }
}

impl<I: IntegerBackend> fmt::Display for Fraction<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num.is_zero() {
            return write!(f, "0");
        }
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        if self.num.terms().len() > 1 {
            write!(f, "({})", self.num)?;
        } else {
            write!(f, "{}", self.num)?;
        }
        write!(f, "/")?;
        if self.den.terms().len() > 1 {
            write!(f, "({})", self.den)
        } else {
            write!(f, "{}", self.den)
        }
    }
}
