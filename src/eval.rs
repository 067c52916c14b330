use std::collections::HashMap;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Rank;

impl Bdd {
    /// Evaluates `f` under `assignment`, following one root-to-terminal path.
    ///
    /// Only the variables on that path are queried.
    pub fn evaluate(&self, f: Ref, assignment: impl Fn(Rank) -> bool) -> bool {
        let mut node = f;
        loop {
            match self.node(node) {
                Node::Constant(value) => return value,
                Node::Choice { rank, low, high } => {
                    node = if assignment(rank) { high } else { low };
                }
            }
        }
    }

    /// Evaluates `f` under a partial assignment.
    ///
    /// Fails with [`Error::UnassignedVariable`] only if the path actually
    /// reaches a variable missing from `assignment`.
    pub fn evaluate_map(&self, f: Ref, assignment: &HashMap<Rank, bool>) -> Result<bool> {
        self.check(f)?;
        let mut node = f;
        loop {
            match self.node(node) {
                Node::Constant(value) => return Ok(value),
                Node::Choice { rank, low, high } => {
                    let value = *assignment.get(&rank).ok_or(Error::UnassignedVariable { rank })?;
                    node = if value { high } else { low };
                }
            }
        }
    }
}
