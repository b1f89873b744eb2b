//! Property tests for the numeric tower, with `num-bigint` and
//! `num-rational` as oracles for the hand-written types.

use std::str::FromStr;

use proptest::prelude::*;

use surdx_num::{factorize, is_prime, nth_root, BigInt, NumError, Rational, Surd};

fn oracle(v: &BigInt) -> num_bigint::BigInt {
    num_bigint::BigInt::from_str(&v.to_string()).expect("decimal form")
}

fn arb_bigint() -> impl Strategy<Value = BigInt> {
    // Decimal strings up to ~40 digits cover several limbs.
    ("[+-]?[1-9][0-9]{0,39}", any::<bool>()).prop_map(|(s, zero)| {
        if zero {
            BigInt::from_i64(0)
        } else {
            s.parse().unwrap()
        }
    })
}

proptest! {
    #[test]
    fn bigint_add_commutes(a in arb_bigint(), b in arb_bigint()) {
        prop_assert_eq!(a.clone() + b.clone(), b + a);
    }

    #[test]
    fn bigint_sub_self_is_zero(a in arb_bigint()) {
        prop_assert!((a.clone() - a).to_string() == "0");
    }

    #[test]
    fn bigint_mul_matches_oracle(a in arb_bigint(), b in arb_bigint()) {
        let got = a.clone() * b.clone();
        let want = oracle(&a) * oracle(&b);
        prop_assert_eq!(oracle(&got), want);
    }

    #[test]
    fn bigint_divrem_identity(a in arb_bigint(), b in arb_bigint()) {
        match a.divrem(&b) {
            Err(NumError::DivisionByZero) => prop_assert!(b.to_string() == "0"),
            Err(e) => prop_assert!(false, "unexpected error {e}"),
            Ok((q, r)) => {
                prop_assert_eq!(q.clone() * b.clone() + r.clone(), a);
                prop_assert!(!r.is_negative(), "remainder must be non-negative");
                prop_assert!(r.abs() < b.abs());
            }
        }
    }

    #[test]
    fn bigint_mul_div_round_trip(a in arb_bigint(), b in arb_bigint()) {
        prop_assume!(b.to_string() != "0");
        let (q, r) = (a.clone() * b.clone()).divrem(&b).unwrap();
        prop_assert_eq!(q, a);
        prop_assert!(r.to_string() == "0");
    }

    #[test]
    fn bigint_decimal_round_trip(s in "-?[1-9][0-9]{0,60}") {
        let v: BigInt = s.parse().unwrap();
        prop_assert_eq!(v.to_string(), s);
    }

    #[test]
    fn bigint_gcd_matches_oracle(a in arb_bigint(), b in arb_bigint()) {
        use num_integer::Integer;
        let got = a.gcd(&b);
        let want = oracle(&a).gcd(&oracle(&b));
        prop_assert_eq!(oracle(&got), want);
    }

    #[test]
    fn rational_canonical_form(n in -10_000i64..10_000, d in -10_000i64..10_000) {
        prop_assume!(d != 0);
        let q = Rational::<i64>::new(n, d).unwrap();
        prop_assert!(*q.denominator() > 0);
        let g = num_integer::gcd(q.numerator().abs(), *q.denominator());
        prop_assert_eq!(g, 1);
    }

    #[test]
    fn rational_print_parse_round_trip(n in -10_000i64..10_000, d in 1i64..10_000) {
        let q = Rational::<i64>::new(n, d).unwrap();
        let back = Rational::<i64>::parse(&q.to_string()).unwrap();
        prop_assert_eq!(q, back);
    }

    #[test]
    fn rational_add_matches_oracle(
        an in -1000i64..1000, ad in 1i64..1000,
        bn in -1000i64..1000, bd in 1i64..1000,
    ) {
        let a = Rational::<i64>::new(an, ad).unwrap();
        let b = Rational::<i64>::new(bn, bd).unwrap();
        let got = a.add(&b);
        let want = num_rational::Rational64::new(an, ad) + num_rational::Rational64::new(bn, bd);
        prop_assert_eq!(*got.numerator(), *want.numer());
        prop_assert_eq!(*got.denominator(), *want.denom());
    }

    #[test]
    fn factorize_multiplies_back(n in 2i64..2_000_000) {
        let factors = factorize(&n);
        let mut back = 1i64;
        for (p, k) in &factors {
            prop_assert!(is_prime(p));
            back *= p.pow(*k);
        }
        prop_assert_eq!(back, n);
    }

    #[test]
    fn surd_canonical_invariants(coe in -50i64..50, rad in 1i64..5000, index in 1u32..6) {
        let s = Surd::<i64>::new(
            Rational::from_i64(coe),
            Rational::from_i64(rad),
            index,
        ).unwrap();
        // Denominator-free radicand.
        prop_assert!(s.radicand().is_integer());
        if s.is_zero() {
            prop_assert_eq!(s.index(), 1);
            prop_assert!(s.radicand().is_one());
        } else if s.index() > 1 {
            // No factor with multiplicity >= index, and minimal index.
            let factors = factorize(&s.radicand().numerator().abs());
            let mut g = s.index();
            for (_, k) in &factors {
                prop_assert!(*k < s.index());
                g = num_integer::gcd(g, *k);
            }
            prop_assert_eq!(g, 1);
        }
    }

    #[test]
    fn surd_times_reciprocal_is_one(coe in 1i64..40, rad in 1i64..200, index in 1u32..5) {
        let s = Surd::<i64>::new(
            Rational::from_i64(coe),
            Rational::from_i64(rad),
            index,
        ).unwrap();
        let p = s.mul(&s.reciprocal().unwrap()).unwrap();
        prop_assert_eq!(p, Surd::one());
    }

    #[test]
    fn nth_root_pow_round_trip(n in 1u32..5, xn in 1i64..80, xd in 1i64..80) {
        let x = Rational::<i64>::new(xn, xd).unwrap();
        let r = nth_root(n, x.clone()).unwrap();
        let back = r.pow(&Rational::from_i64(n as i64)).unwrap();
        prop_assert_eq!(back.to_rational().unwrap(), x);
    }

    #[test]
    fn surd_ordering_matches_f64(
        ac in -10i64..10, ar in 1i64..60, ai in 1u32..4,
        bc in -10i64..10, br in 1i64..60, bi in 1u32..4,
    ) {
        let a = Surd::<i64>::new(Rational::from_i64(ac), Rational::from_i64(ar), ai).unwrap();
        let b = Surd::<i64>::new(Rational::from_i64(bc), Rational::from_i64(br), bi).unwrap();
        let fa = a.to_f64();
        let fb = b.to_f64();
        // Only check well-separated values; equality is exact-domain.
        prop_assume!((fa - fb).abs() > 1e-9);
        prop_assert_eq!(a < b, fa < fb);
    }
}

#[test]
fn first_primes_are_prime() {
    // The first 10_000 primes via a sieve, checked against is_prime.
    let limit = 104_730usize; // covers the 10_000th prime (104_729)
    let mut sieve = vec![true; limit + 1];
    sieve[0] = false;
    sieve[1] = false;
    let mut i = 2;
    while i * i <= limit {
        if sieve[i] {
            let mut j = i * i;
            while j <= limit {
                sieve[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    let mut count = 0;
    for (n, &prime) in sieve.iter().enumerate() {
        assert_eq!(
            is_prime(&(n as i64)),
            prime,
            "disagreement with the sieve at {n}"
        );
        if prime {
            count += 1;
        }
    }
    assert!(count >= 10_000);
}

#[test]
fn carmichael_and_pseudoprime_composites() {
    // Carmichael numbers defeat the Fermat pre-filter on its own; the
    // larger entries are strong pseudoprimes to the first prime bases.
    let composites: [i64; 17] = [
        561,
        1105,
        1729,
        2465,
        2821,
        6601,
        8911,
        10_585,
        15_841,
        29_341,
        41_041,
        46_657,
        52_633,
        62_745,
        75_361,
        3_215_031_751,
        341_550_071_728_321,
    ];
    for c in composites {
        assert!(!is_prime(&c), "{c} must be composite");
    }
}
