//! The generic tower instantiated over the hand-written bignum
//! backend, where coefficient arithmetic actually leaves the 64-bit
//! range.

use surdx_num::{factorize, is_prime, nth_root, BigInt, Rational, Surd};

fn big(s: &str) -> BigInt {
    s.parse().expect("decimal literal")
}

fn rational(n: &str, d: &str) -> Rational<BigInt> {
    Rational::new(big(n), big(d)).expect("nonzero denominator")
}

#[test]
fn rational_arithmetic_beyond_i64() {
    let a = rational("123456789012345678901234567890", "2");
    let b = rational("1", "3");
    let sum = a.add(&b);
    assert_eq!(
        sum.to_string(),
        "185185183518518518351851851836/3"
    );
    let product = rational("10", "3").mul(&rational("3", "5"));
    assert_eq!(product.to_string(), "2");
}

#[test]
fn rational_string_round_trip_with_big_components() {
    let q = rational("-987654321098765432109876543210", "123456789012345678901234567891");
    let back = Rational::<BigInt>::parse(&q.to_string()).unwrap();
    assert_eq!(q, back);
}

#[test]
fn surd_extraction_with_large_perfect_powers() {
    // √(2^100) = 2^50
    let radicand = Rational::from_int(big("2").pow_u32(100));
    let s = Surd::new(Rational::one(), radicand, 2).unwrap();
    assert!(s.is_rational());
    assert_eq!(
        s.to_rational().unwrap().to_string(),
        big("2").pow_u32(50).to_string()
    );
    // √(2^101) = 2^50 √2
    let radicand = Rational::from_int(big("2").pow_u32(101));
    let s = Surd::new(Rational::one(), radicand, 2).unwrap();
    assert_eq!(s.coe().to_string(), big("2").pow_u32(50).to_string());
    assert_eq!(s.radicand().to_string(), "2");
    assert_eq!(s.index(), 2);
}

#[test]
fn nth_root_round_trip_over_bignum() {
    let x = rational("123456789", "65537");
    let r = nth_root(3, x.clone()).unwrap();
    let back = r.pow(&Rational::from_i64(3)).unwrap();
    assert_eq!(back.to_rational().unwrap(), x);
}

#[test]
fn mersenne_prime_and_neighbors() {
    // 2^61 - 1 is prime; its even neighbors clearly are not.
    let m61 = big("2305843009213693951");
    assert!(is_prime(&m61));
    assert!(!is_prime(&big("2305843009213693950")));
    assert!(!is_prime(&big("2305843009213693952")));
}

#[test]
fn factorization_of_a_large_smooth_number() {
    // 2^40 · 3^20 · 7^10
    let n = big("2").pow_u32(40) * big("3").pow_u32(20) * big("7").pow_u32(10);
    let factors = factorize(&n);
    assert_eq!(factors.get(&big("2")), Some(&40));
    assert_eq!(factors.get(&big("3")), Some(&20));
    assert_eq!(factors.get(&big("7")), Some(&10));
    assert_eq!(factors.len(), 3);
}

#[test]
fn factorization_of_a_semiprime() {
    // two 10-digit primes
    let p = big("1000000007");
    let q = big("1000000009");
    let n = p.clone() * q.clone();
    let factors = factorize(&n);
    assert_eq!(factors.get(&p), Some(&1));
    assert_eq!(factors.get(&q), Some(&1));
}
