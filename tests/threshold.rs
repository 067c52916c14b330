use test_log::test;

use choice_bdd::bdd::Bdd;
use choice_bdd::reference::Ref;

fn popcount(mask: u32) -> i64 {
    mask.count_ones() as i64
}

#[test]
fn test_threshold_exhaustive() {
    for n in 0..=8usize {
        let bdd = Bdd::default();
        let vars: Vec<Ref> = (0..n).map(|i| bdd.new_variable(&format!("x{}", i)).unwrap()).collect();

        for k in -1..=n as i64 + 1 {
            let at_least = bdd.at_least_n(k, &vars).unwrap();
            let at_most = bdd.at_most_n(k, &vars).unwrap();
            let exactly = bdd.exactly(k, &vars).unwrap();

            for mask in 0..1u32 << n {
                let assignment = |rank: choice_bdd::types::Rank| mask >> rank.index() & 1 == 1;
                let count = popcount(mask);
                assert_eq!(bdd.evaluate(at_least, assignment), count >= k, "at_least_n({}) n={} mask={:b}", k, n, mask);
                assert_eq!(bdd.evaluate(at_most, assignment), count <= k, "at_most_n({}) n={} mask={:b}", k, n, mask);
                assert_eq!(bdd.evaluate(exactly, assignment), count == k, "exactly({}) n={} mask={:b}", k, n, mask);
            }
        }
    }
}

#[test]
fn test_threshold_with_gaps_in_ranks() {
    let bdd = Bdd::default();
    let vars: Vec<Ref> = [3u32, 9, 1, 20]
        .iter()
        .enumerate()
        .map(|(i, &rank)| bdd.variable(&format!("v{}", i), rank).unwrap())
        .collect();
    // A variable not in the gadget, ranked between the others.
    let other = bdd.variable("other", 5u32).unwrap();

    let f = bdd.exactly(2, &vars).unwrap();
    assert!(!bdd.support(f).contains(&bdd.rank(other)));
    assert_eq!(bdd.support(f).len(), 4);

    // 6 of the 16 assignments to the gadget's own variables, times 2 for `other`
    assert_eq!(bdd.sat_count(f, 5).to_string(), "12");
}

#[test]
fn test_exactly_is_conjunction_of_bounds() {
    let bdd = Bdd::default();
    let vars: Vec<Ref> = (0..6).map(|i| bdd.new_variable(&format!("x{}", i)).unwrap()).collect();
    for k in 0..=6 {
        let both = bdd.and(bdd.at_least_n(k, &vars).unwrap(), bdd.at_most_n(k, &vars).unwrap()).unwrap();
        assert_eq!(bdd.exactly(k, &vars).unwrap(), both);
    }
}
