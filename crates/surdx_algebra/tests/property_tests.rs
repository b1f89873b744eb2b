//! Property tests for the symbolic layer.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use surdx_algebra::{BinOp, ExprNode, Fraction, Poly, Term};
use surdx_num::{Rational, Surd};

fn arb_term() -> impl Strategy<Value = Term<i64>> {
    (
        -20i64..20,
        prop::sample::select(vec![(1i64, 1u32), (2, 2), (3, 2), (5, 2), (2, 3)]),
        prop::collection::btree_map("[xyz]", 0i64..4, 0..3usize),
    )
        .prop_map(|(c, (radicand, index), symbols)| {
            let coe = Surd::new(
                Rational::from_i64(c),
                Rational::from_i64(radicand),
                index,
            )
            .expect("small surds normalize");
            let symbols: BTreeMap<String, Rational<i64>> = symbols
                .into_iter()
                .map(|(name, exp)| (name, Rational::from_i64(exp)))
                .collect();
            Term::new(coe, symbols)
        })
}

fn arb_poly() -> impl Strategy<Value = Poly<i64>> {
    prop::collection::vec(arb_term(), 0..6usize).prop_map(Poly::new)
}

fn env_xyz() -> FxHashMap<String, f64> {
    FxHashMap::from_iter([
        ("x".to_string(), 1.25f64),
        ("y".to_string(), 0.75f64),
        ("z".to_string(), 2.5f64),
    ])
}

#[test]
fn binomial_power_over_the_bignum_backend() {
    use surdx_num::BigInt;

    // (x + 1)^70: the central coefficient C(70, 35) does not fit in 64
    // bits, so this only works if the whole tower runs over bignums.
    let x_plus_one: Poly<BigInt> = Poly::new(vec![
        Term::symbol("x"),
        Term::from_surd(Surd::one()),
    ]);
    let expanded = x_plus_one.pow(&Rational::from_i64(70)).unwrap();
    assert_eq!(expanded.terms().len(), 71);

    let central = expanded
        .terms()
        .iter()
        .find(|t| {
            t.symbols()
                .get("x")
                .map_or(false, |e| *e == Rational::from_i64(35))
        })
        .expect("x^35 term");
    assert_eq!(
        central.coe().coe().numerator().to_string(),
        "112186277816662845432"
    );

    // Substituting x = 1 sums the coefficients to 2^70.
    let env: surdx_algebra::Environment<BigInt> =
        surdx_algebra::Environment::from_iter([("x".to_string(), Surd::one())]);
    let total = expanded
        .substitute(&env)
        .unwrap()
        .try_to_surd()
        .expect("constant polynomial");
    assert_eq!(
        total.to_rational().unwrap().to_string(),
        "1180591620717411303424"
    );
}

proptest! {
    #[test]
    fn normalization_is_idempotent(p in arb_poly()) {
        let again = Poly::new(p.terms().to_vec());
        prop_assert_eq!(&again, &p);
    }

    #[test]
    fn addition_commutes(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn add_then_subtract_round_trips(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn multiplication_matches_numeric_evaluation(a in arb_poly(), b in arb_poly()) {
        let env = env_xyz();
        let product = a.mul(&b).expect("small products");
        let (ea, eb, ep) = (
            a.eval_f64(&env).expect("x y z all mapped"),
            b.eval_f64(&env).expect("x y z all mapped"),
            product.eval_f64(&env).expect("x y z all mapped"),
        );
        let want = ea * eb;
        prop_assert!(
            (ep - want).abs() <= 1e-6 * (1.0 + want.abs()),
            "{ep} != {want}"
        );
    }

    #[test]
    fn rational_fractions_are_fully_reduced(n in -500i64..500, d in 1i64..500) {
        let f = Fraction::<i64>::from_rational(Rational::new(n, d).unwrap());
        let mut coes: Vec<i64> = Vec::new();
        for t in f.numerator().terms().iter().chain(f.denominator().terms()) {
            coes.push(t.coe().coe().numerator().abs());
        }
        let g = coes.into_iter().fold(0i64, num_integer::gcd);
        prop_assert!(g <= 1 || f.numerator().is_zero());
    }

    #[test]
    fn numeric_trees_always_fold(ops in prop::collection::vec(
        (prop::sample::select(vec![BinOp::Add, BinOp::Sub, BinOp::Mul]), -9i64..9),
        1..8usize,
    )) {
        // Symbol-free trees built from total operators must fold to a
        // single fraction.
        let mut node = ExprNode::Frac(Fraction::<i64>::from_i64(1));
        for (op, v) in ops {
            node = ExprNode::op(op, node, ExprNode::Frac(Fraction::from_i64(v)));
        }
        let folded = node.normalize().expect("no division, no errors");
        prop_assert!(folded.as_fraction().is_some());
        prop_assert!(folded.try_eval().expect("folded").is_some());
    }

    #[test]
    fn trees_with_a_free_symbol_do_not_fold_to_values(v in -9i64..9) {
        let node = ExprNode::op(
            BinOp::Pow,
            ExprNode::Frac(Fraction::<i64>::from_i64(2)),
            ExprNode::op(
                BinOp::Add,
                ExprNode::Frac(Fraction::symbol("k")),
                ExprNode::Frac(Fraction::from_i64(v)),
            ),
        );
        let n = node.normalize().expect("symbolic trees normalize");
        prop_assert!(n.as_fraction().is_none());
        prop_assert_eq!(n.eval_f64(&FxHashMap::default()), None);
    }
}
