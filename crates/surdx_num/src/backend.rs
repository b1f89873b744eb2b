//! Uniform integer interface over the selectable backends.
//!
//! The rest of the tower is generic over [`IntegerBackend`]; a cargo
//! feature picks which backend the [`crate::Int`] alias points at:
//! `backend-i64`, `backend-i128` (default) or `backend-bignum`.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::bignum::BigInt;
use crate::error::NumError;

/// The integer operations the numeric tower needs, beyond plain
/// arithmetic: gcd/lcm for reduction, modular arithmetic for the
/// primality test, bit inspection for Miller–Rabin and the square
/// root, and uniform sampling for Pollard's rho.
pub trait IntegerBackend:
    Sized
    + Clone
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// Backend name reported by the `version` command.
    const NAME: &'static str;

    /// True for the arbitrary-precision backend; the primality test
    /// switches to probabilistic witnesses only where the magnitude
    /// can actually exceed every deterministic band.
    const UNBOUNDED: bool;

    fn from_i64(v: i64) -> Self;

    fn from_u32(v: u32) -> Self {
        Self::from_i64(v as i64)
    }

    /// Decimal parse; every backend accepts an optional leading sign.
    fn parse_decimal(s: &str) -> Result<Self, NumError>;

    fn to_i64(&self) -> Option<i64>;

    fn to_u32(&self) -> Option<u32> {
        self.to_i64().and_then(|v| u32::try_from(v).ok())
    }

    fn to_f64(&self) -> f64;

    fn abs(&self) -> Self;

    fn is_negative(&self) -> bool;

    fn gcd(&self, other: &Self) -> Self;

    fn lcm(&self, other: &Self) -> Self;

    /// Power by repeated squaring; `pow(0)` is 1.
    fn pow_u32(&self, exp: u32) -> Self;

    /// `(a * b) mod m`, assuming `0 <= a, b < m`.
    fn mulmod(a: &Self, b: &Self, m: &Self) -> Self;

    /// `base^exp mod m` for non-negative `exp` and positive `m`.
    fn modpow(base: &Self, exp: &Self, m: &Self) -> Self;

    /// Bits in the magnitude; zero for zero.
    fn bit_width(&self) -> u64;

    /// Integer square root of the magnitude.
    fn isqrt(&self) -> Self;

    fn is_even(&self) -> bool;

    /// Magnitude shifted right one bit, keeping the sign.
    fn half(&self) -> Self;

    /// Uniform sample in `[0, bound)`; `bound` must be positive.
    fn random_below(bound: &Self) -> Self;
}

impl IntegerBackend for i64 {
    const NAME: &'static str = "i64";
    const UNBOUNDED: bool = false;

    fn from_i64(v: i64) -> Self {
        v
    }

    fn parse_decimal(s: &str) -> Result<Self, NumError> {
        s.parse()
            .map_err(|_| NumError::MalformedNumber(s.to_string()))
    }

    fn to_i64(&self) -> Option<i64> {
        Some(*self)
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn abs(&self) -> Self {
        i64::abs(*self)
    }

    fn is_negative(&self) -> bool {
        *self < 0
    }

    fn gcd(&self, other: &Self) -> Self {
        Integer::gcd(self, other)
    }

    fn lcm(&self, other: &Self) -> Self {
        Integer::lcm(self, other)
    }

    fn pow_u32(&self, exp: u32) -> Self {
        i64::pow(*self, exp)
    }

    fn mulmod(a: &Self, b: &Self, m: &Self) -> Self {
        ((*a as i128 * *b as i128) % *m as i128) as i64
    }

    fn modpow(base: &Self, exp: &Self, m: &Self) -> Self {
        let mut b = base % m;
        let mut e = *exp;
        let mut acc = 1i64;
        while e > 0 {
            if e & 1 == 1 {
                acc = Self::mulmod(&acc, &b, m);
            }
            e >>= 1;
            if e > 0 {
                b = Self::mulmod(&b, &b, m);
            }
        }
        acc
    }

    fn bit_width(&self) -> u64 {
        (64 - self.unsigned_abs().leading_zeros()) as u64
    }

    fn isqrt(&self) -> Self {
        let n = self.unsigned_abs();
        let mut x = (n as f64).sqrt() as u64;
        while (x + 1).checked_mul(x + 1).map_or(false, |s| s <= n) {
            x += 1;
        }
        while x.checked_mul(x).map_or(true, |s| s > n) {
            x -= 1;
        }
        x as i64
    }

    fn is_even(&self) -> bool {
        self % 2 == 0
    }

    fn half(&self) -> Self {
        self / 2
    }

    fn random_below(bound: &Self) -> Self {
        rand::thread_rng().gen_range(0..*bound)
    }
}

impl IntegerBackend for i128 {
    const NAME: &'static str = "i128";
    const UNBOUNDED: bool = false;

    fn from_i64(v: i64) -> Self {
        v as i128
    }

    fn parse_decimal(s: &str) -> Result<Self, NumError> {
        s.parse()
            .map_err(|_| NumError::MalformedNumber(s.to_string()))
    }

    fn to_i64(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn abs(&self) -> Self {
        i128::abs(*self)
    }

    fn is_negative(&self) -> bool {
        *self < 0
    }

    fn gcd(&self, other: &Self) -> Self {
        Integer::gcd(self, other)
    }

    fn lcm(&self, other: &Self) -> Self {
        Integer::lcm(self, other)
    }

    fn pow_u32(&self, exp: u32) -> Self {
        i128::pow(*self, exp)
    }

    fn mulmod(a: &Self, b: &Self, m: &Self) -> Self {
        // No wider type to widen into: double-and-add below the modulus.
        let m = *m as u128;
        let mut a = (*a as u128) % m;
        let mut b = *b as u128;
        let mut acc = 0u128;
        while b > 0 {
            if b & 1 == 1 {
                acc = (acc + a) % m;
            }
            a = (a << 1) % m;
            b >>= 1;
        }
        acc as i128
    }

    fn modpow(base: &Self, exp: &Self, m: &Self) -> Self {
        let mut b = base % m;
        let mut e = *exp;
        let mut acc = 1i128;
        while e > 0 {
            if e & 1 == 1 {
                acc = Self::mulmod(&acc, &b, m);
            }
            e >>= 1;
            if e > 0 {
                b = Self::mulmod(&b, &b, m);
            }
        }
        acc
    }

    fn bit_width(&self) -> u64 {
        (128 - self.unsigned_abs().leading_zeros()) as u64
    }

    fn isqrt(&self) -> Self {
        let n = self.unsigned_abs();
        let mut x = (n as f64).sqrt() as u128;
        while (x + 1).checked_mul(x + 1).map_or(false, |s| s <= n) {
            x += 1;
        }
        while x.checked_mul(x).map_or(true, |s| s > n) {
            x -= 1;
        }
        x as i128
    }

    fn is_even(&self) -> bool {
        self % 2 == 0
    }

    fn half(&self) -> Self {
        self / 2
    }

    fn random_below(bound: &Self) -> Self {
        rand::thread_rng().gen_range(0..*bound)
    }
}

impl IntegerBackend for BigInt {
    const NAME: &'static str = "bignum";
    const UNBOUNDED: bool = true;

    fn from_i64(v: i64) -> Self {
        BigInt::from_i64(v)
    }

    fn parse_decimal(s: &str) -> Result<Self, NumError> {
        s.parse()
    }

    fn to_i64(&self) -> Option<i64> {
        BigInt::to_i64(self)
    }

    fn to_f64(&self) -> f64 {
        BigInt::to_f64(self)
    }

    fn abs(&self) -> Self {
        BigInt::abs(self)
    }

    fn is_negative(&self) -> bool {
        BigInt::is_negative(self)
    }

    fn gcd(&self, other: &Self) -> Self {
        BigInt::gcd(self, other)
    }

    fn lcm(&self, other: &Self) -> Self {
        BigInt::lcm(self, other)
    }

    fn pow_u32(&self, exp: u32) -> Self {
        BigInt::pow_u32(self, exp)
    }

    fn mulmod(a: &Self, b: &Self, m: &Self) -> Self {
        BigInt::mulmod(a, b, m)
    }

    fn modpow(base: &Self, exp: &Self, m: &Self) -> Self {
        BigInt::modpow(base, exp, m)
    }

    fn bit_width(&self) -> u64 {
        BigInt::bit_width(self)
    }

    fn isqrt(&self) -> Self {
        BigInt::isqrt(self)
    }

    fn is_even(&self) -> bool {
        BigInt::is_even(self)
    }

    fn half(&self) -> Self {
        BigInt::half(self)
    }

    fn random_below(bound: &Self) -> Self {
        let bits = bound.bit_width();
        let limbs = bound.limbs().len();
        let top_bits = bits - (limbs as u64 - 1) * 30;
        let top_mask = if top_bits >= 30 {
            (1u32 << 30) - 1
        } else {
            (1u32 << top_bits) - 1
        };
        let mut rng = rand::thread_rng();
        loop {
            let mut digits: Vec<u32> = (0..limbs).map(|_| rng.gen::<u32>() & ((1 << 30) - 1)).collect();
            if let Some(top) = digits.last_mut() {
                *top &= top_mask;
            }
            let mut s = BigInt::zero();
            for &d in digits.iter().rev() {
                s = s * BigInt::from_i64(1 << 30) + BigInt::from_i64(d as i64);
            }
            if &s < bound {
                return s;
            }
        }
    }
}
