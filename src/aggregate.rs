//! Conjunction of many constraints.
//!
//! Folding a long list of gadgets with `and` is correct in any order, but the
//! intermediate results can be exponentially larger than the final one when
//! the order is bad. The strategies below differ only in the order (and
//! shape) of the fold; by canonicity they all return the same [`Ref`].

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::bdd::Bdd;
use crate::error::Result;
use crate::reference::Ref;
use crate::types::Rank;

/// Order in which [`Bdd::aggregate`] conjoins its inputs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Bottom-most constraints first (by descending top rank), left fold.
    Ordered,
    /// Next constraint is the one sharing most variables with the accumulator.
    #[default]
    GreedyOverlap,
    /// Pairwise conjunction in levels.
    BinaryTree,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Ordered, Strategy::GreedyOverlap, Strategy::BinaryTree];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Ordered => "ordered",
            Strategy::GreedyOverlap => "greedy",
            Strategy::BinaryTree => "tree",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Strategy::Ordered),
            "greedy" => Ok(Strategy::GreedyOverlap),
            "tree" => Ok(Strategy::BinaryTree),
            _ => Err(format!("unknown strategy '{}', expected one of: ordered, greedy, tree", s)),
        }
    }
}

struct Candidate {
    position: usize,
    node: Ref,
    support: Vec<Rank>,
    top: Rank,
}

impl Bdd {
    /// Conjoins `constraints` with the configured [`Strategy`].
    pub fn aggregate(&self, constraints: &[Ref]) -> Result<Ref> {
        self.aggregate_with(constraints, self.config().strategy)
    }

    /// Conjoins `constraints` with the given [`Strategy`].
    ///
    /// An empty input is TRUE. Any FALSE input, or a FALSE intermediate
    /// result, ends the fold with FALSE. Cancellation and the node limit are
    /// checked before every fold step; on abort the store stays valid.
    pub fn aggregate_with(&self, constraints: &[Ref], strategy: Strategy) -> Result<Ref> {
        for &c in constraints {
            self.check(c)?;
        }

        info!(
            "aggregate: {} constraints, strategy = {}, {} nodes",
            constraints.len(),
            strategy,
            self.num_nodes()
        );

        if constraints.iter().any(|&c| self.is_zero(c)) {
            info!("aggregate: FALSE among inputs");
            return Ok(self.zero());
        }

        let inputs: Vec<Ref> = constraints.iter().copied().filter(|&c| !self.is_one(c)).collect();
        let res = match strategy {
            Strategy::Ordered => self.aggregate_ordered(inputs)?,
            Strategy::GreedyOverlap => self.aggregate_greedy(inputs)?,
            Strategy::BinaryTree => self.aggregate_tree(inputs)?,
        };

        info!("aggregate: result {} of size {}, {} nodes", res, self.size(res), self.num_nodes());
        Ok(res)
    }

    fn fold_step(&self, acc: Ref, next: Ref) -> Result<Ref> {
        self.checkpoint()?;
        let res = self.choice(acc, self.zero(), next)?;
        debug!("fold: {} AND {} -> {}", acc, next, res);
        Ok(res)
    }

    fn aggregate_ordered(&self, mut inputs: Vec<Ref>) -> Result<Ref> {
        inputs.sort_by_key(|&c| Reverse(self.rank(c)));

        let mut acc = self.one();
        for c in inputs {
            acc = self.fold_step(acc, c)?;
            if self.is_zero(acc) {
                break;
            }
        }
        Ok(acc)
    }

    fn aggregate_greedy(&self, inputs: Vec<Ref>) -> Result<Ref> {
        let mut remaining: Vec<Candidate> = inputs
            .into_iter()
            .enumerate()
            .map(|(position, node)| Candidate {
                position,
                node,
                support: self.support(node),
                top: self.rank(node),
            })
            .collect();

        let mut acc = self.one();
        let mut acc_support: HashSet<Rank> = HashSet::new();

        while !remaining.is_empty() {
            let best = remaining
                .iter()
                .enumerate()
                .max_by_key(|(_, c)| {
                    let overlap = c.support.iter().filter(|r| acc_support.contains(r)).count();
                    let own = c.support.len() - overlap;
                    (overlap, Reverse(own), c.top, Reverse(c.position))
                })
                .map(|(i, _)| i)
                .unwrap_or(0);
            let picked = remaining.swap_remove(best);

            acc = self.fold_step(acc, picked.node)?;
            if self.is_zero(acc) {
                break;
            }
            acc_support.extend(picked.support);
        }
        Ok(acc)
    }

    fn aggregate_tree(&self, mut level: Vec<Ref>) -> Result<Ref> {
        if level.is_empty() {
            return Ok(self.one());
        }

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks(2) {
                let res = match pair {
                    &[a, b] => self.fold_step(a, b)?,
                    &[leftover] => {
                        let last = next.pop().unwrap_or(self.one());
                        self.fold_step(last, leftover)?
                    }
                    _ => unreachable!(),
                };
                if self.is_zero(res) {
                    return Ok(res);
                }
                next.push(res);
            }
            debug!("tree level: {} -> {} nodes", level.len(), next.len());
            level = next;
        }
        Ok(level[0])
    }
}
