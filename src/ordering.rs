//! Variable ordering: the rank <-> name registry of a session.
//!
//! Every variable gets exactly one rank and every rank names exactly one
//! variable. Because of this bijection, nodes only store the rank; the
//! label is looked up here when a node is printed or enumerated.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::{Error, Result};
use crate::types::{Rank, Variable};

#[derive(Debug, Default, Clone)]
pub struct VariableOrdering {
    by_rank: BTreeMap<Rank, String>,
    by_name: HashMap<String, Rank>,
}

impl VariableOrdering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` at `rank`.
    ///
    /// Declaring the same pair twice is a no-op. Returns [`Error::IdentityConflict`]
    /// when either the rank or the name is already bound to something else.
    pub fn declare(&mut self, name: &str, rank: Rank) -> Result<Variable> {
        if rank.is_terminal() {
            return Err(Error::InvalidRank(rank));
        }

        if let Some(existing) = self.by_rank.get(&rank) {
            if existing != name {
                return Err(Error::IdentityConflict {
                    name: name.to_string(),
                    rank,
                    existing: existing.clone(),
                });
            }
            return Ok(Variable::new(name, rank));
        }

        if let Some(&other) = self.by_name.get(name) {
            return Err(Error::IdentityConflict {
                name: name.to_string(),
                rank,
                existing: format!("{} at {}", name, other),
            });
        }

        debug!("declare(name = {}, rank = {})", name, rank);
        self.by_rank.insert(rank, name.to_string());
        self.by_name.insert(name.to_string(), rank);
        Ok(Variable::new(name, rank))
    }

    /// Registers `name` one rank below the current lowest variable.
    pub fn declare_next(&mut self, name: &str) -> Result<Variable> {
        if let Some(&rank) = self.by_name.get(name) {
            return Ok(Variable::new(name, rank));
        }
        let rank = self.next_rank()?;
        self.declare(name, rank)
    }

    /// Returns the first rank below every declared variable.
    ///
    /// Fails with [`Error::InvalidRank`] once the lowest variable sits directly
    /// above [`Rank::TERMINAL`].
    pub fn next_rank(&self) -> Result<Rank> {
        match self.by_rank.keys().next_back() {
            Some(&last) => last.next().ok_or(Error::InvalidRank(Rank::TERMINAL)),
            None => Ok(Rank::new(0)),
        }
    }

    pub fn name(&self, rank: Rank) -> Option<&str> {
        self.by_rank.get(&rank).map(String::as_str)
    }

    pub fn rank(&self, name: &str) -> Option<Rank> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, rank: Rank) -> Option<Variable> {
        self.name(rank).map(|name| Variable::new(name, rank))
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.by_rank.contains_key(&rank)
    }

    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }

    /// Iterates over the declared variables in rank order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.by_rank.iter().map(|(&rank, name)| Variable::new(name.as_str(), rank))
    }

    pub fn clear(&mut self) {
        self.by_rank.clear();
        self.by_name.clear();
    }
}
