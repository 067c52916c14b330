//! Hash-consed node store.
//!
//! Nodes live in a plain `Vec<Node>` indexed by [`Ref::index`]; the per-rank
//! [`Subtable`]s map `(low, high)` to that index. Index 0 is FALSE and index 1
//! is TRUE in every session.
//!
//! Each store carries a session id drawn from a process-wide counter. Every
//! [`Ref`] it hands out is tagged with that id, and every ref it receives is
//! checked against it, so nodes from another store (or from before a
//! [`clear`][NodeStore::clear]) are rejected instead of silently aliasing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::subtable::Subtable;
use crate::types::Rank;

static NEXT_SESSION: AtomicU32 = AtomicU32::new(1);

fn fresh_session() -> u32 {
    NEXT_SESSION.fetch_add(1, Ordering::Relaxed)
}

pub struct NodeStore {
    session: u32,
    nodes: Vec<Node>,
    subtables: BTreeMap<Rank, Subtable>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            session: fresh_session(),
            nodes: vec![Node::Constant(false), Node::Constant(true)],
            subtables: BTreeMap::new(),
        }
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    /// Canonical constant of this session.
    pub fn constant(&self, value: bool) -> Ref {
        let index = if value { Ref::ONE_INDEX } else { Ref::ZERO_INDEX };
        Ref::new(self.session, index)
    }

    /// Checks that `node` was created by this session.
    pub fn check(&self, node: Ref) -> Result<()> {
        if node.session() != self.session {
            return Err(Error::CrossSessionMix {
                expected: self.session,
                found: node.session(),
            });
        }
        debug_assert!((node.index() as usize) < self.nodes.len());
        Ok(())
    }

    /// Returns the node behind `node`. The ref must belong to this session.
    pub fn node(&self, node: Ref) -> Node {
        debug_assert_eq!(node.session(), self.session);
        self.nodes[node.index() as usize]
    }

    pub fn rank(&self, node: Ref) -> Rank {
        self.node(node).rank()
    }

    /// Returns the canonical node `(rank, low, high)`.
    ///
    /// Equal children collapse to the child itself; nothing is allocated.
    pub fn intern(&mut self, rank: Rank, low: Ref, high: Ref) -> Result<Ref> {
        self.check(low)?;
        self.check(high)?;

        if low == high {
            return Ok(low);
        }

        for child in [low, high] {
            let child_rank = self.rank(child);
            if rank >= child_rank {
                return Err(Error::OrderingViolation { rank, child_rank });
            }
        }

        let subtable = self.subtables.entry(rank).or_insert_with(|| Subtable::new(rank));
        if let Some(index) = subtable.find(low, high) {
            return Ok(Ref::new(self.session, index));
        }

        let index = u32::try_from(self.nodes.len()).expect("node store index overflow");
        self.nodes.push(Node::Choice { rank, low, high });
        subtable.insert(low, high, index);
        Ok(Ref::new(self.session, index))
    }

    /// Number of stored nodes, constants included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the two constants are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 2
    }

    /// Number of interior nodes per rank.
    pub fn nodes_per_rank(&self) -> BTreeMap<Rank, usize> {
        self.subtables
            .iter()
            .filter(|(_, st)| !st.is_empty())
            .map(|(&rank, st)| (rank, st.len()))
            .collect()
    }

    /// Drops every node and starts a fresh session.
    pub fn clear(&mut self) {
        let old = self.session;
        self.session = fresh_session();
        self.nodes.truncate(2);
        self.subtables.clear();
        debug!("store cleared: session {} -> {}", old, self.session);
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
