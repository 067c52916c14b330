//! Per-rank unique table.
//!
//! All nodes of one subtable share the same rank, so the hash key is just the
//! `(low, high)` pair of children:
//!
//! ```text
//! subtables[R0] → Subtable for rank 0
//! subtables[R1] → Subtable for rank 1
//! ...
//! ```
//!
//! Keeping the nodes grouped by rank makes per-rank statistics cheap, which is
//! what one inspects when an aggregation starts to blow up.

use std::collections::HashMap;

use crate::reference::Ref;
use crate::types::Rank;

#[derive(Debug, Clone)]
pub struct Subtable {
    /// The rank shared by all nodes in this subtable.
    pub rank: Rank,

    /// Map from (low, high) to node index in the store.
    nodes: HashMap<(Ref, Ref), u32>,
}

impl Subtable {
    pub fn new(rank: Rank) -> Self {
        Self {
            rank,
            nodes: HashMap::new(),
        }
    }

    /// Look up a node by its children.
    pub fn find(&self, low: Ref, high: Ref) -> Option<u32> {
        self.nodes.get(&(low, high)).copied()
    }

    pub fn insert(&mut self, low: Ref, high: Ref, index: u32) {
        self.nodes.insert((low, high), index);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtable_basic() {
        let mut st = Subtable::new(Rank::new(1));

        let low = Ref::new(0, Ref::ZERO_INDEX);
        let high = Ref::new(0, Ref::ONE_INDEX);

        assert!(st.find(low, high).is_none());
        assert!(st.is_empty());

        st.insert(low, high, 42);
        assert_eq!(st.find(low, high), Some(42));
        assert_eq!(st.find(high, low), None);
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn test_subtable_multiple_nodes() {
        let mut st = Subtable::new(Rank::new(1));

        st.insert(Ref::new(0, 0), Ref::new(0, 1), 10);
        st.insert(Ref::new(0, 2), Ref::new(0, 3), 20);
        st.insert(Ref::new(0, 0), Ref::new(0, 3), 30);

        assert_eq!(st.len(), 3);
        assert_eq!(st.find(Ref::new(0, 2), Ref::new(0, 3)), Some(20));
        assert_eq!(st.find(Ref::new(0, 0), Ref::new(0, 3)), Some(30));
    }
}
