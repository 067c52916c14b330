//! Cardinality gadgets.
//!
//! `at_least_n(k, vars)` and `at_most_n(k, vars)` are built by a dynamic
//! program over `k + 1` (resp. `k + 2`) slots. Slot `i` holds the function
//! "the variables swept so far contribute enough to move from `i` to the
//! accepting slot". Sweeping the variables from the bottom rank up, every
//! slot becomes `choice(var, slot[i], slot[i + 1])`, so each slot only ever
//! talks about variables below the one being added and every `choice` call
//! lands on its cheap path. The result has `O(n * k)` nodes.

use std::collections::HashSet;

use log::debug;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::reference::Ref;

impl Bdd {
    /// Checks that `vars` are distinct elementary variables of this session
    /// and returns them sorted by descending rank.
    fn threshold_vars(&self, vars: &[Ref]) -> Result<Vec<Ref>> {
        let mut seen = HashSet::new();
        for &var in vars {
            self.check(var)?;
            if !self.is_variable(var) {
                return Err(Error::NotAVariable { node: var });
            }
            let rank = self.rank(var);
            if !seen.insert(rank) {
                return Err(Error::DuplicateVariable { rank });
            }
        }

        let mut sorted = vars.to_vec();
        sorted.sort_by_key(|&var| std::cmp::Reverse(self.rank(var)));
        Ok(sorted)
    }

    /// Runs the slot sweep and returns the first slot.
    fn sweep_slots(&self, mut slots: Vec<Ref>, vars: &[Ref]) -> Result<Ref> {
        for &var in vars {
            for i in 0..slots.len() - 1 {
                let (lo, hi) = (slots[i], slots[i + 1]);
                if lo != hi {
                    slots[i] = self.choice(var, lo, hi)?;
                }
            }
        }
        Ok(slots[0])
    }

    /// At least `k` of `vars` are true.
    pub fn at_least_n(&self, k: i64, vars: &[Ref]) -> Result<Ref> {
        debug!("at_least_n(k = {}, vars = {})", k, vars.len());
        let vars = self.threshold_vars(vars)?;

        if (vars.len() as i64) < k {
            return Ok(self.zero());
        }
        if k <= 0 {
            return Ok(self.one());
        }

        let k = k as usize;
        let mut slots = vec![self.zero(); k];
        slots.push(self.one());
        self.sweep_slots(slots, &vars)
    }

    /// At most `k` of `vars` are true.
    pub fn at_most_n(&self, k: i64, vars: &[Ref]) -> Result<Ref> {
        debug!("at_most_n(k = {}, vars = {})", k, vars.len());
        let vars = self.threshold_vars(vars)?;

        if k < 0 {
            return Ok(self.zero());
        }
        if k > vars.len() as i64 {
            return Ok(self.one());
        }

        let k = k as usize;
        let mut slots = vec![self.one(); k + 1];
        slots.push(self.zero());
        self.sweep_slots(slots, &vars)
    }

    /// Exactly `k` of `vars` are true.
    pub fn exactly(&self, k: i64, vars: &[Ref]) -> Result<Ref> {
        let at_most = self.at_most_n(k, vars)?;
        let at_least = self.at_least_n(k, vars)?;
        self.choice(at_most, self.zero(), at_least)
    }
}
