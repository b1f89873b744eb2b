//! Surds: `coe · radicand^(1/index)` with rational coefficient and
//! radicand.
//!
//! Every constructor normalizes. Afterwards the radicand is an integer
//! free of perfect `index`-th-power factors, the index is minimal, and
//! degenerate shapes are snapped to canonical ones: zero is
//! `(0, 1, 1)`, any rational is `(q, 1, 1)`.

use std::cmp::Ordering;
use std::fmt;

use num_traits::One;

use crate::backend::IntegerBackend;
use crate::error::NumError;
use crate::factor::factorize;
use crate::rational::Rational;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Surd<I: IntegerBackend> {
    coe: Rational<I>,
    radicand: Rational<I>,
    index: u32,
}

fn gcd_u32(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd_u32(b, a % b)
    }
}

fn lcm_u32(a: u32, b: u32) -> Result<u32, NumError> {
    let l = a as u64 / gcd_u32(a, b) as u64 * b as u64;
    u32::try_from(l).map_err(|_| NumError::Overflow("radical index"))
}

impl<I: IntegerBackend> Surd<I> {
    pub fn new(coe: Rational<I>, radicand: Rational<I>, index: u32) -> Result<Self, NumError> {
        let mut s = Surd {
            coe,
            radicand,
            index,
        };
        s.normalize()?;
        Ok(s)
    }

    pub fn from_rational(q: Rational<I>) -> Self {
        Surd {
            coe: q,
            radicand: Rational::one(),
            index: 1,
        }
    }

    pub fn from_i64(v: i64) -> Self {
        Self::from_rational(Rational::from_i64(v))
    }

    pub fn zero() -> Self {
        Self::from_rational(Rational::zero())
    }

    pub fn one() -> Self {
        Self::from_rational(Rational::one())
    }

    pub fn coe(&self) -> &Rational<I> {
        &self.coe
    }

    pub fn radicand(&self) -> &Rational<I> {
        &self.radicand
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_zero(&self) -> bool {
        self.coe.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.index == 1 && self.coe.is_one()
    }

    /// Rational surds carry their whole value in the coefficient.
    pub fn is_rational(&self) -> bool {
        self.index == 1
    }

    pub fn is_negative(&self) -> bool {
        self.coe.is_negative() != self.radicand.is_negative()
    }

    /// Same radical part: this is what makes two surds addable and two
    /// terms mergeable.
    pub fn radical_part_eq(&self, other: &Self) -> bool {
        self.index == other.index && self.radicand == other.radicand
    }

    fn normalize(&mut self) -> Result<(), NumError> {
        if self.index == 0 {
            return Err(NumError::Internal("surd index must be positive".into()));
        }
        if self.coe.is_zero() || self.radicand.is_zero() {
            self.coe = Rational::zero();
            self.radicand = Rational::one();
            self.index = 1;
            return Ok(());
        }
        if self.index == 1 {
            self.coe = self.coe.mul(&self.radicand);
            self.radicand = Rational::one();
            return Ok(());
        }

        // Pull the denominator out of the radicand:
        // (n/d)^(1/k) = (n * d^(k-1))^(1/k) / d.
        if !self.radicand.is_integer() {
            let den = Rational::from_int(self.radicand.denominator().clone());
            let lifted = self.radicand.mul(&den.pow_int(&I::from_u32(self.index))?);
            self.coe = self.coe.div(&den)?;
            self.radicand = lifted;
        }

        let negative = self.radicand.is_negative();
        let mag = self.radicand.numerator().abs();
        let factors = factorize(&mag);

        // Extract every perfect index-th power into the coefficient.
        let mut remaining: Vec<(I, u32)> = Vec::with_capacity(factors.len());
        for (p, k) in factors {
            if k >= self.index {
                let extracted = p.pow_u32(k / self.index);
                self.coe = self.coe.mul(&Rational::from_int(extracted));
            }
            let rem = k % self.index;
            if rem > 0 {
                remaining.push((p, rem));
            }
        }

        // Minimal index: divide out the gcd of the index and all
        // remaining exponents. A negative radicand only admits odd
        // reductions (the sign must stay under an even root).
        let mut g = remaining
            .iter()
            .fold(self.index, |g, (_, k)| gcd_u32(g, *k));
        if negative {
            while g % 2 == 0 {
                g /= 2;
            }
        }
        if g > 1 {
            for (_, k) in remaining.iter_mut() {
                *k /= g;
            }
            self.index /= g;
        }

        let mut radicand = I::one();
        for (p, k) in &remaining {
            radicand = radicand * p.pow_u32(*k);
        }
        if negative {
            radicand = -radicand;
        }
        self.radicand = Rational::from_int(radicand);

        if self.radicand.is_one() {
            self.index = 1;
        }
        if self.index == 1 {
            self.coe = self.coe.mul(&self.radicand);
            self.radicand = Rational::one();
        }
        Ok(())
    }

    /// Addition requires equal radical parts; zero is compatible with
    /// anything.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, NumError> {
        if self.is_zero() {
            return Ok(rhs.clone());
        }
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        if !self.radical_part_eq(rhs) {
            return Err(NumError::RadicalMismatch);
        }
        Surd::new(self.coe.add(&rhs.coe), self.radicand.clone(), self.index)
    }

    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, NumError> {
        self.checked_add(&rhs.neg())
    }

    /// Merge by the lcm of the indices: lift both radicands to the
    /// common index and multiply.
    pub fn mul(&self, rhs: &Self) -> Result<Self, NumError> {
        let l = lcm_u32(self.index, rhs.index)?;
        let r1 = self.radicand.pow_int(&I::from_u32(l / self.index))?;
        let r2 = rhs.radicand.pow_int(&I::from_u32(l / rhs.index))?;
        Surd::new(self.coe.mul(&rhs.coe), r1.mul(&r2), l)
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, NumError> {
        self.mul(&rhs.reciprocal()?)
    }

    pub fn reciprocal(&self) -> Result<Self, NumError> {
        if self.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Surd::new(
            self.coe.reciprocal()?,
            self.radicand.reciprocal()?,
            self.index,
        )
    }

    pub fn neg(&self) -> Self {
        Surd {
            coe: self.coe.neg(),
            radicand: self.radicand.clone(),
            index: self.index,
        }
    }

    /// Raise to a rational power. Integer exponents raise coefficient
    /// and radicand directly; for `a/b` the radicand is raised to `a`,
    /// the index multiplied by `b`, and the coefficient re-enters
    /// through a fresh `b`-th root.
    pub fn pow(&self, p: &Rational<I>) -> Result<Self, NumError> {
        if p.is_integer() {
            if p.is_negative() && self.is_zero() {
                return Err(NumError::DivisionByZero);
            }
            return Surd::new(
                self.coe.pow_int(p.numerator())?,
                self.radicand.pow_int(p.numerator())?,
                self.index,
            );
        }
        let b = p
            .denominator()
            .to_u32()
            .ok_or(NumError::Overflow("radical index"))?;
        let index = self
            .index
            .checked_mul(b)
            .ok_or(NumError::Overflow("radical index"))?;
        let radicand = self.radicand.pow_int(p.numerator())?;
        let coe_raised = self.coe.pow_int(p.numerator())?;
        let base = Surd::new(Rational::one(), radicand, index)?;
        base.mul(&nth_root(b, coe_raised)?)
    }

    /// Read back as a rational; fails while a radical remains.
    pub fn to_rational(&self) -> Result<Rational<I>, NumError> {
        if !self.is_rational() {
            return Err(NumError::NotRational);
        }
        Ok(self.coe.mul(&self.radicand))
    }

    pub fn to_f64(&self) -> f64 {
        let r = self.radicand.to_f64();
        let root = if r < 0.0 {
            // Odd-index real root of a negative radicand.
            -(-r).powf(1.0 / self.index as f64)
        } else {
            r.powf(1.0 / self.index as f64)
        };
        self.coe.to_f64() * root
    }
}

/// `radicand^(1/n)` as a normalized surd.
pub fn nth_root<I: IntegerBackend>(n: u32, radicand: Rational<I>) -> Result<Surd<I>, NumError> {
    Surd::new(Rational::one(), radicand, n)
}

impl<I: IntegerBackend> PartialOrd for Surd<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: IntegerBackend> Ord for Surd<I> {
    /// Order by value: raise both sides to the common index so the
    /// comparison happens between rationals; a shared negative sign
    /// flips the result.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            _ => {}
        }
        let both_negative = self.is_negative();
        let l = match lcm_u32(self.index, other.index) {
            Ok(l) => l,
            Err(_) => return self.index.cmp(&other.index),
        };
        let raise = |s: &Surd<I>| -> Option<Rational<I>> {
            let coe = abs_rational(&s.coe).pow_int(&I::from_u32(l)).ok()?;
            let rad = abs_rational(&s.radicand)
                .pow_int(&I::from_u32(l / s.index))
                .ok()?;
            Some(coe.mul(&rad))
        };
        match (raise(self), raise(other)) {
            (Some(a), Some(b)) => {
                if both_negative {
                    b.cmp(&a)
                } else {
                    a.cmp(&b)
                }
            }
            _ => self.index.cmp(&other.index),
        }
    }
}

fn abs_rational<I: IntegerBackend>(q: &Rational<I>) -> Rational<I> {
    if q.is_negative() {
        q.neg()
    } else {
        q.clone()
    }
}

impl<I: IntegerBackend> fmt::Display for Surd<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coe.is_zero() {
            return write!(f, "0");
        }
        if self.index == 1 {
            return write!(f, "{}", self.coe);
        }
        if self.coe.is_one() {
            // bare radical
        } else if self.coe == Rational::from_i64(-1) {
            write!(f, "-")?;
        } else if self.coe.is_integer() {
            write!(f, "{}", self.coe)?;
        } else {
            write!(f, "({})", self.coe)?;
        }
        if self.index == 2 {
            write!(f, "_/{}", self.radicand)
        } else {
            write!(f, "_{}/{}", self.index, self.radicand)
        }
    }
}
