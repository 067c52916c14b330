//! Error types for node construction.

use thiserror::Error;

use crate::reference::Ref;
use crate::types::Rank;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error("Ordering violation: node rank {rank} is not above child rank {child_rank}")]
    OrderingViolation { rank: Rank, child_rank: Rank },

    #[error("Identity conflict: '{name}' at {rank} clashes with existing '{existing}'")]
    IdentityConflict { name: String, rank: Rank, existing: String },

    #[error("Rank {0} is reserved for constants")]
    InvalidRank(Rank),

    #[error("No variable is declared at {rank}")]
    UndeclaredRank { rank: Rank },

    #[error("Node from session {found} used in session {expected}")]
    CrossSessionMix { expected: u32, found: u32 },

    #[error("Node {node} is not an elementary variable")]
    NotAVariable { node: Ref },

    #[error("Variable at {rank} occurs more than once")]
    DuplicateVariable { rank: Rank },

    #[error("No value assigned to the variable at {rank}")]
    UnassignedVariable { rank: Rank },

    #[error("Construction cancelled")]
    Cancelled,

    #[error("Node limit of {limit} exceeded")]
    NodeLimitExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
