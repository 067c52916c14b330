use crate::reference::Ref;
use crate::types::Rank;

/// A stored node: either a constant or a choice on a ranked variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Constant(bool),
    Choice { rank: Rank, low: Ref, high: Ref },
}

impl Node {
    pub fn rank(&self) -> Rank {
        match *self {
            Node::Constant(_) => Rank::TERMINAL,
            Node::Choice { rank, .. } => rank,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    /// Returns `(low, high)` for choice nodes.
    pub fn children(&self) -> Option<(Ref, Ref)> {
        match *self {
            Node::Constant(_) => None,
            Node::Choice { low, high, .. } => Some((low, high)),
        }
    }
}
