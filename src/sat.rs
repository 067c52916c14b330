use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Variable;

impl Bdd {
    /// Returns one path from `f` to the `goal` terminal, if any exists.
    ///
    /// In a reduced diagram every interior node reaches both terminals, so at
    /// each step the walk takes the high branch unless it is the opposite
    /// constant. Terminals are never descended into.
    pub fn satisfy(&self, f: Ref, goal: bool) -> Option<Vec<(Variable, bool)>> {
        let dead_end = self.constant(!goal);
        if f == dead_end {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;
        while let Node::Choice { low, high, .. } = self.node(current) {
            let var = self.variable_of(current).expect("choice node has a declared variable");
            if high != dead_end {
                path.push((var, true));
                current = high;
            } else {
                path.push((var, false));
                current = low;
            }
        }

        debug_assert_eq!(current, self.constant(goal));
        Some(path)
    }

    /// Returns one satisfying path for `f`, or `None` if `f` is FALSE.
    pub fn one_sat(&self, f: Ref) -> Option<Vec<(Variable, bool)>> {
        self.satisfy(f, true)
    }

    /// Returns true if `f` has no path to FALSE.
    pub fn is_valid(&self, f: Ref) -> bool {
        self.satisfy(f, false).is_none()
    }

    /// Number of assignments to `num_vars` variables that satisfy `f`.
    ///
    /// `num_vars` must cover the support of `f`.
    pub fn sat_count(&self, f: Ref, num_vars: usize) -> BigUint {
        let max = BigUint::from(2u32).pow(num_vars as u32);
        let mut counts: HashMap<Ref, BigUint> = HashMap::new();

        // Post-order walk: a node is counted once both of its children are.
        let mut stack = vec![(f, false)];
        while let Some((node, children_done)) = stack.pop() {
            if counts.contains_key(&node) {
                continue;
            }
            match self.node(node) {
                Node::Constant(false) => {
                    counts.insert(node, BigUint::ZERO);
                }
                Node::Constant(true) => {
                    counts.insert(node, max.clone());
                }
                Node::Choice { low, high, .. } if children_done => {
                    // Each branch covers half of the assignments.
                    let count: BigUint = (&counts[&low] + &counts[&high]) >> 1;
                    counts.insert(node, count);
                }
                Node::Choice { low, high, .. } => {
                    stack.push((node, true));
                    stack.push((high, false));
                    stack.push((low, false));
                }
            }
        }

        counts.remove(&f).unwrap_or_default()
    }
}
