//! Primality testing and integer factorization.
//!
//! Small inputs (below 10^5) go through trial division on the 6k±1
//! wheel. Larger inputs get a divisibility pre-filter against the
//! first primes and then Miller–Rabin, with witness sets chosen by
//! magnitude so the test stays deterministic as far as the published
//! bounds reach; beyond that the witnesses are random. Factorization
//! is Pollard's rho with Brent-style batched gcds.

use std::collections::BTreeMap;

use log::debug;
use num_traits::{One, Zero};

use crate::backend::IntegerBackend;

const TRIAL_DIVISION_LIMIT: i64 = 100_000;

const FIRST_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Deterministic witness-count bands, largest threshold first. An
/// entry whose threshold does not fit the backend is simply skipped,
/// which is exactly when it cannot apply.
const WITNESS_BANDS: [(&str, usize); 11] = [
    ("1543267864443420616877677640751301", 20),
    ("564132928021909221014087501701", 18),
    ("59276361075595573263446330101", 16),
    ("6003094289670105800312596501", 15),
    ("3317044064679887385961981", 14),
    ("318665857834031151167461", 13),
    ("3825123056546413051", 12),
    ("341550071728321", 9),
    ("3474749660383", 7),
    ("2152302898747", 6),
    ("4759123141", 5),
];

/// Above this, witness choice turns probabilistic.
const PROBABILISTIC_THRESHOLD: &str = "1000000000000000000000000000000000000";
const PROBABILISTIC_ROUNDS: usize = 40;

pub fn is_prime<I: IntegerBackend>(n: &I) -> bool {
    if n.is_negative() {
        return false;
    }
    if let Some(small) = n.to_i64() {
        if small < TRIAL_DIVISION_LIMIT {
            return is_prime_slow(small);
        }
    }
    is_prime_fast(n)
}

/// Trial division on the 6k±1 wheel.
fn is_prime_slow(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 || n == 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    if n < 9 {
        return true;
    }
    let bound = IntegerBackend::isqrt(&n) + 1;
    let mut i = 5;
    while i < bound {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

fn is_prime_fast<I: IntegerBackend>(n: &I) -> bool {
    // Pre-filter: obvious composites fall to the first primes.
    for p in FIRST_PRIMES {
        let p = I::from_u32(p);
        if *n == p {
            return true;
        }
        if (n.clone() % p).is_zero() {
            return false;
        }
    }

    if I::UNBOUNDED {
        if let Ok(t) = I::parse_decimal(PROBABILISTIC_THRESHOLD) {
            if *n >= t {
                return miller_rabin(n, &random_witnesses(n, PROBABILISTIC_ROUNDS));
            }
        }
    }
    for (threshold, count) in WITNESS_BANDS {
        if let Ok(t) = I::parse_decimal(threshold) {
            if *n >= t {
                let w: Vec<I> = FIRST_PRIMES[..count].iter().map(|&p| I::from_u32(p)).collect();
                return miller_rabin(n, &w);
            }
        }
    }
    // Everything below 4_759_123_141 is covered by {2, 7, 61}.
    let w = [I::from_u32(2), I::from_u32(7), I::from_u32(61)];
    miller_rabin(n, &w)
}

fn random_witnesses<I: IntegerBackend>(n: &I, rounds: usize) -> Vec<I> {
    // Uniform in [2, n - 2].
    let span = n.clone() - I::from_u32(3);
    (0..rounds)
        .map(|_| I::random_below(&span) + I::from_u32(2))
        .collect()
}

fn miller_rabin<I: IntegerBackend>(n: &I, witnesses: &[I]) -> bool {
    let n_minus_1 = n.clone() - I::one();
    let mut d = n_minus_1.clone();
    let mut s = 0u32;
    while d.is_even() {
        d = d.half();
        s += 1;
    }
    'witness: for a in witnesses {
        let a = a.clone() % n.clone();
        if a.is_zero() {
            continue;
        }
        let mut x = I::modpow(&a, &d, n);
        if x.is_one() || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = I::mulmod(&x, &x, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// One nontrivial factor of a composite `n > 1`. Retries with a fresh
/// random constant whenever the cycle closes without finding one.
fn pollard_rho<I: IntegerBackend>(n: &I) -> I {
    if *n == I::from_u32(4) {
        return I::from_u32(2);
    }
    loop {
        // c in [1, n - 2]
        let c = I::random_below(&(n.clone() - I::from_u32(2))) + I::one();
        let step = |x: &I| (I::mulmod(x, x, n) + c.clone()) % n.clone();

        let mut tortoise = I::zero();
        let mut hare = I::zero();
        let mut product = I::one();
        loop {
            // Batch 128 steps between gcds, accumulating |t - h|.
            for _ in 0..128 {
                tortoise = step(&tortoise);
                hare = step(&step(&hare));
                if tortoise == hare {
                    break;
                }
                let diff = (tortoise.clone() - hare.clone()).abs();
                let q = I::mulmod(&product, &diff, n);
                if q.is_zero() {
                    break;
                }
                product = q;
            }
            let d = product.gcd(n);
            if !d.is_one() && d != *n {
                return d;
            }
            if tortoise == hare {
                debug!("pollard rho cycle closed without a factor, retrying");
                break;
            }
        }
    }
}

/// Full factorization of `n >= 1` into a prime -> multiplicity map.
pub fn factorize<I: IntegerBackend>(n: &I) -> BTreeMap<I, u32> {
    let mut out = BTreeMap::new();
    if *n > I::one() {
        factorize_into(n.clone(), &mut out);
    }
    out
}

fn factorize_into<I: IntegerBackend>(n: I, out: &mut BTreeMap<I, u32>) {
    if n.is_one() {
        return;
    }
    if is_prime(&n) {
        *out.entry(n).or_insert(0) += 1;
        return;
    }
    let d = pollard_rho(&n);
    let rest = n / d.clone();
    factorize_into(d, out);
    factorize_into(rest, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes_and_composites() {
        let primes = [2i64, 3, 5, 7, 11, 97, 99991];
        let composites = [1i64, 4, 9, 91, 99989, 99999];
        for p in primes {
            assert!(is_prime(&p), "{p} should be prime");
        }
        for c in composites {
            assert!(!is_prime(&c), "{c} should be composite");
        }
        assert!(!is_prime(&-7i64));
    }

    #[test]
    fn carmichael_numbers_are_rejected() {
        // Fermat-only tests pass these; Miller–Rabin must not.
        for c in [561i64, 1105, 1729, 2465, 2821, 6601, 8911, 101101, 252601, 410041] {
            assert!(!is_prime(&c), "{c} is a Carmichael number");
        }
    }

    #[test]
    fn strong_pseudoprimes_are_rejected() {
        // Strong pseudoprimes to the first few prime bases.
        for c in [3215031751i64, 3474749660383, 341550071728321] {
            assert!(!is_prime(&c), "{c} is a strong pseudoprime");
        }
    }

    #[test]
    fn large_primes_pass() {
        for p in [1000000007i64, 998244353, 2147483647, 2305843009213693951] {
            assert!(is_prime(&p), "{p} should be prime");
        }
        // The smallest composite passing bases {2, 7, 61} must still be
        // caught by the wider witness band it lands in.
        assert!(!is_prime(&4759123141i64));
    }

    #[test]
    fn factorize_round_trips() {
        for n in [2i64, 4, 12, 97, 5040, 1234554321, 999999999989, 600851475143] {
            let factors = factorize(&n);
            let mut back = 1i64;
            for (p, k) in &factors {
                assert!(is_prime(p), "{p} reported as a factor of {n}");
                back *= p.pow_u32(*k);
            }
            assert_eq!(back, n);
        }
    }

    #[test]
    fn factorize_trivial_inputs() {
        assert!(factorize(&1i64).is_empty());
        let f = factorize(&8i64);
        assert_eq!(f.get(&2), Some(&3));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn factorize_known_multiset() {
        let f = factorize(&1234554321i64);
        let expected: Vec<(i64, u32)> =
            vec![(3, 1), (7, 1), (11, 1), (13, 1), (37, 1), (41, 1), (271, 1)];
        let got: Vec<(i64, u32)> = f.into_iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn bignum_primality_agrees() {
        use crate::bignum::BigInt;
        let p: BigInt = "2305843009213693951".parse().unwrap();
        assert!(is_prime(&p));
        let c: BigInt = "2305843009213693953".parse().unwrap();
        assert_eq!(is_prime(&c), is_prime(&2305843009213693953i64));
    }
}
