//! Exact rational numbers over an [`IntegerBackend`].
//!
//! Always reduced: the denominator is positive and coprime with the
//! numerator. Addition goes through the lcm of the denominators and
//! multiplication cross-reduces first, both to keep intermediates
//! small on the fixed-width backends.

use std::cmp::Ordering;
use std::fmt;

use num_traits::{One, Zero};

use crate::backend::IntegerBackend;
use crate::error::NumError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational<I: IntegerBackend> {
    num: I,
    den: I,
}

impl<I: IntegerBackend> Rational<I> {
    pub fn new(num: I, den: I) -> Result<Self, NumError> {
        if den.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let mut r = Rational { num, den };
        r.reduce();
        Ok(r)
    }

    pub fn from_int(num: I) -> Self {
        Rational {
            num,
            den: I::one(),
        }
    }

    pub fn from_i64(v: i64) -> Self {
        Self::from_int(I::from_i64(v))
    }

    pub fn zero() -> Self {
        Self::from_int(I::zero())
    }

    pub fn one() -> Self {
        Self::from_int(I::one())
    }

    /// Accepts `[±]n`, `[±]n/d` and `[±]n.d…` forms.
    pub fn parse(s: &str) -> Result<Self, NumError> {
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let num = I::parse_decimal(n.trim())?;
            let den = I::parse_decimal(d.trim())?;
            return Rational::new(num, den);
        }
        if let Some((int_part, frac_part)) = s.split_once('.') {
            if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(NumError::MalformedNumber(s.to_string()));
            }
            let (negative, int_digits) = match int_part.as_bytes().first() {
                Some(b'-') => (true, &int_part[1..]),
                Some(b'+') => (false, &int_part[1..]),
                _ => (false, int_part),
            };
            let combined = format!("{int_digits}{frac_part}");
            let num = I::parse_decimal(&combined)?;
            let num = if negative { -num } else { num };
            let den = I::from_i64(10).pow_u32(frac_part.len() as u32);
            return Rational::new(num, den);
        }
        Ok(Self::from_int(I::parse_decimal(s)?))
    }

    /// Exact rational from a float, probing decimal places until the
    /// fractional part is exhausted (or the float's precision is).
    pub fn from_f64(v: f64) -> Result<Self, NumError> {
        if !v.is_finite() {
            return Err(NumError::MalformedNumber(v.to_string()));
        }
        let mut scaled = v;
        let mut places = 0u32;
        while scaled.fract() != 0.0 && places < 17 {
            scaled *= 10.0;
            places += 1;
        }
        let num = I::parse_decimal(&format!("{:.0}", scaled))?;
        let den = I::from_i64(10).pow_u32(places);
        Rational::new(num, den)
    }

    fn reduce(&mut self) {
        if self.num.is_zero() {
            self.den = I::one();
            return;
        }
        let g = self.num.gcd(&self.den);
        if !g.is_one() {
            self.num = self.num.clone() / g.clone();
            self.den = self.den.clone() / g;
        }
        if self.den.is_negative() {
            self.num = -self.num.clone();
            self.den = -self.den.clone();
        }
    }

    pub fn numerator(&self) -> &I {
        &self.num
    }

    pub fn denominator(&self) -> &I {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    pub fn add(&self, rhs: &Self) -> Self {
        // lcm-based: a/b + c/d = (a*(l/b) + c*(l/d)) / l
        let l = self.den.lcm(&rhs.den);
        let num = self.num.clone() * (l.clone() / self.den.clone())
            + rhs.num.clone() * (l.clone() / rhs.den.clone());
        let mut r = Rational { num, den: l };
        r.reduce();
        r
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        // Cross-reduce before multiplying.
        let g1 = self.num.gcd(&rhs.den);
        let g2 = rhs.num.gcd(&self.den);
        let num = (self.num.clone() / g1.clone()) * (rhs.num.clone() / g2.clone());
        let den = (self.den.clone() / g2) * (rhs.den.clone() / g1);
        let mut r = Rational { num, den };
        r.reduce();
        r
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, NumError> {
        Ok(self.mul(&rhs.reciprocal()?))
    }

    pub fn neg(&self) -> Self {
        Rational {
            num: -self.num.clone(),
            den: self.den.clone(),
        }
    }

    pub fn reciprocal(&self) -> Result<Self, NumError> {
        Rational::new(self.den.clone(), self.num.clone())
    }

    /// Integer power; a negative exponent goes through the reciprocal.
    /// Non-integer exponents are surd-building and live on `Surd`.
    pub fn pow_int(&self, exp: &I) -> Result<Self, NumError> {
        if exp.is_negative() {
            let e = -exp.clone();
            return self.reciprocal()?.pow_int(&e);
        }
        let e = exp.to_u32().ok_or(NumError::Overflow("exponent"))?;
        Ok(Rational {
            num: self.num.pow_u32(e),
            den: self.den.pow_u32(e),
        })
    }

    pub fn pow(&self, exp: &Rational<I>) -> Result<Self, NumError> {
        if !exp.is_integer() {
            return Err(NumError::NonIntegerExponent);
        }
        self.pow_int(exp.numerator())
    }

    pub fn to_f64(&self) -> f64 {
        self.num.to_f64() / self.den.to_f64()
    }
}

// Operator sugar over the total methods; division stays a fallible
// method because of the zero divisor.
impl<I: IntegerBackend> std::ops::Add for &Rational<I> {
    type Output = Rational<I>;

    fn add(self, rhs: &Rational<I>) -> Rational<I> {
        Rational::add(self, rhs)
    }
}

impl<I: IntegerBackend> std::ops::Add for Rational<I> {
    type Output = Rational<I>;

    fn add(self, rhs: Rational<I>) -> Rational<I> {
        Rational::add(&self, &rhs)
    }
}

impl<I: IntegerBackend> std::ops::Sub for &Rational<I> {
    type Output = Rational<I>;

    fn sub(self, rhs: &Rational<I>) -> Rational<I> {
        Rational::sub(self, rhs)
    }
}

impl<I: IntegerBackend> std::ops::Sub for Rational<I> {
    type Output = Rational<I>;

    fn sub(self, rhs: Rational<I>) -> Rational<I> {
        Rational::sub(&self, &rhs)
    }
}

impl<I: IntegerBackend> std::ops::Mul for &Rational<I> {
    type Output = Rational<I>;

    fn mul(self, rhs: &Rational<I>) -> Rational<I> {
        Rational::mul(self, rhs)
    }
}

impl<I: IntegerBackend> std::ops::Mul for Rational<I> {
    type Output = Rational<I>;

    fn mul(self, rhs: Rational<I>) -> Rational<I> {
        Rational::mul(&self, &rhs)
    }
}

impl<I: IntegerBackend> std::ops::Neg for Rational<I> {
    type Output = Rational<I>;

    fn neg(self) -> Rational<I> {
        Rational::neg(&self)
    }
}

impl<I: IntegerBackend> PartialOrd for Rational<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: IntegerBackend> Ord for Rational<I> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps order.
        let lhs = self.num.clone() * other.den.clone();
        let rhs = other.num.clone() * self.den.clone();
        lhs.cmp(&rhs)
    }
}

impl<I: IntegerBackend> fmt::Display for Rational<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q = Rational<i64>;

    fn q(n: i64, d: i64) -> Q {
        Q::new(n, d).unwrap()
    }

    #[test]
    fn construction_reduces_and_fixes_sign() {
        assert_eq!(q(2, 4), q(1, 2));
        assert_eq!(q(1, -2), q(-1, 2));
        assert_eq!(*q(1, -2).denominator(), 2);
        assert_eq!(q(0, -5), Q::zero());
        assert!(Q::new(1, 0).is_err());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(q(1, 2).add(&q(1, 3)), q(5, 6));
        assert_eq!(q(1, 2).sub(&q(1, 3)), q(1, 6));
        assert_eq!(q(2, 3).mul(&q(3, 4)), q(1, 2));
        assert_eq!(q(1, 2).div(&q(1, 4)).unwrap(), q(2, 1));
        assert_eq!(q(1, 2).div(&Q::zero()), Err(NumError::DivisionByZero));
    }

    #[test]
    fn parse_forms() {
        assert_eq!(Q::parse("3").unwrap(), q(3, 1));
        assert_eq!(Q::parse("-3/6").unwrap(), q(-1, 2));
        assert_eq!(Q::parse("0.25").unwrap(), q(1, 4));
        assert_eq!(Q::parse("-1.5").unwrap(), q(-3, 2));
        assert!(Q::parse("1.").is_err());
        assert!(Q::parse("abc").is_err());
    }

    #[test]
    fn from_f64_probes_decimal_places() {
        assert_eq!(Q::from_f64(0.5).unwrap(), q(1, 2));
        assert_eq!(Q::from_f64(-2.0).unwrap(), q(-2, 1));
        assert_eq!(Q::from_f64(0.125).unwrap(), q(1, 8));
        assert!(Q::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn pow_int_handles_negative_exponents() {
        assert_eq!(q(2, 3).pow_int(&3).unwrap(), q(8, 27));
        assert_eq!(q(2, 3).pow_int(&-2).unwrap(), q(9, 4));
        assert_eq!(q(5, 1).pow_int(&0).unwrap(), Q::one());
        assert!(Q::zero().pow_int(&-1).is_err());
    }

    #[test]
    fn ordering_crosses_denominators() {
        assert!(q(1, 3) < q(1, 2));
        assert!(q(-1, 2) < q(-1, 3));
        assert!(q(7, 3) > q(2, 1));
    }

    #[test]
    fn display() {
        assert_eq!(q(5, 6).to_string(), "5/6");
        assert_eq!(q(-4, 2).to_string(), "-2");
    }
}
