//! Random formulas checked against their truth tables.

use num_bigint::BigUint;
use proptest::prelude::*;

use choice_bdd::bdd::Bdd;
use choice_bdd::node::Node;
use choice_bdd::reference::Ref;

fn setup(n: usize) -> (Bdd, Vec<Ref>) {
    let bdd = Bdd::default();
    let vars = (0..n).map(|i| bdd.new_variable(&format!("x{}", i)).unwrap()).collect();
    (bdd, vars)
}

fn is_reduced_and_ordered(bdd: &Bdd, root: Ref) -> bool {
    bdd.descendants([root]).into_iter().all(|node| match bdd.node(node) {
        Node::Constant(_) => true,
        Node::Choice { rank, low, high } => low != high && rank < bdd.rank(low) && rank < bdd.rank(high),
    })
}

/// A small formula language for random constructions.
#[derive(Debug, Clone)]
enum Formula {
    Var(usize),
    Const(bool),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Xor(Box<Formula>, Box<Formula>),
    Choice(Box<Formula>, Box<Formula>, Box<Formula>),
}

const MAX_VARS: usize = 12;

fn formula(num_vars: usize) -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![(0..num_vars).prop_map(Formula::Var), any::<bool>().prop_map(Formula::Const)];
    leaf.prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|f| Formula::Not(Box::new(f))),
            (inner.clone(), inner.clone()).prop_map(|(f, g)| Formula::And(Box::new(f), Box::new(g))),
            (inner.clone(), inner.clone()).prop_map(|(f, g)| Formula::Or(Box::new(f), Box::new(g))),
            (inner.clone(), inner.clone()).prop_map(|(f, g)| Formula::Xor(Box::new(f), Box::new(g))),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(i, f, g)| Formula::Choice(Box::new(i), Box::new(f), Box::new(g))),
        ]
    })
}

/// A variable count in `1..=MAX_VARS` with a formula over it.
fn sized_formula() -> impl Strategy<Value = (usize, Formula)> {
    (1..=MAX_VARS).prop_flat_map(|n| (Just(n), formula(n)))
}

/// A variable count with two formulas over it.
fn sized_formula_pair() -> impl Strategy<Value = (usize, Formula, Formula)> {
    (1..=MAX_VARS).prop_flat_map(|n| (Just(n), formula(n), formula(n)))
}

impl Formula {
    fn eval(&self, mask: u32) -> bool {
        match self {
            Formula::Var(i) => mask >> i & 1 == 1,
            Formula::Const(value) => *value,
            Formula::Not(f) => !f.eval(mask),
            Formula::And(f, g) => f.eval(mask) && g.eval(mask),
            Formula::Or(f, g) => f.eval(mask) || g.eval(mask),
            Formula::Xor(f, g) => f.eval(mask) ^ g.eval(mask),
            Formula::Choice(i, f, g) => {
                if i.eval(mask) {
                    g.eval(mask)
                } else {
                    f.eval(mask)
                }
            }
        }
    }

    fn build(&self, bdd: &Bdd, vars: &[Ref]) -> Ref {
        match self {
            Formula::Var(i) => vars[*i],
            Formula::Const(value) => bdd.constant(*value),
            Formula::Not(f) => bdd.negate(f.build(bdd, vars)).unwrap(),
            Formula::And(f, g) => bdd.and(f.build(bdd, vars), g.build(bdd, vars)).unwrap(),
            Formula::Or(f, g) => bdd.or(f.build(bdd, vars), g.build(bdd, vars)).unwrap(),
            Formula::Xor(f, g) => bdd.xor(f.build(bdd, vars), g.build(bdd, vars)).unwrap(),
            Formula::Choice(i, f, g) => {
                let i = i.build(bdd, vars);
                let f = f.build(bdd, vars);
                let g = g.build(bdd, vars);
                bdd.choice(i, f, g).unwrap()
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_evaluation_matches_truth_table((num_vars, f) in sized_formula()) {
        let (bdd, vars) = setup(num_vars);
        let node = f.build(&bdd, &vars);
        prop_assert!(is_reduced_and_ordered(&bdd, node));

        let mut models = 0u32;
        for mask in 0..1u32 << num_vars {
            let expected = f.eval(mask);
            prop_assert_eq!(bdd.evaluate(node, |rank| mask >> rank.index() & 1 == 1), expected);
            models += expected as u32;
        }
        prop_assert_eq!(bdd.sat_count(node, num_vars), BigUint::from(models));
        prop_assert_eq!(bdd.is_valid(node), models == 1 << num_vars);
        prop_assert_eq!(node == bdd.zero(), models == 0);
    }

    #[test]
    fn prop_equal_functions_have_equal_refs((num_vars, f, g) in sized_formula_pair()) {
        let (bdd, vars) = setup(num_vars);
        let nf = f.build(&bdd, &vars);
        let ng = g.build(&bdd, &vars);
        let same = (0..1u32 << num_vars).all(|mask| f.eval(mask) == g.eval(mask));
        prop_assert_eq!(nf == ng, same);
        prop_assert_eq!(bdd.to_canonical_string(nf) == bdd.to_canonical_string(ng), same);
    }
}
