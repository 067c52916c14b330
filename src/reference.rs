use std::fmt::{Display, Formatter};

/// A handle to a node of one session.
///
/// Within a session, two refs are equal iff they denote the same Boolean function.
/// Refs of different sessions are never equal, and the manager rejects them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ref {
    session: u32,
    index: u32,
}

impl Ref {
    /// Index of the FALSE constant in every session.
    pub const ZERO_INDEX: u32 = 0;
    /// Index of the TRUE constant in every session.
    pub const ONE_INDEX: u32 = 1;

    pub(crate) const fn new(session: u32, index: u32) -> Self {
        Self { session, index }
    }

    /// Returns the session this reference belongs to.
    pub const fn session(self) -> u32 {
        self.session
    }

    /// Returns the index of the node in its session's store.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns true if this is one of the two constants.
    pub const fn is_constant(self) -> bool {
        self.index <= Self::ONE_INDEX
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Self::ZERO_INDEX => write!(f, "@0"),
            Self::ONE_INDEX => write!(f, "@1"),
            i => write!(f, "@{}#{}", i, self.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_basics() {
        let zero = Ref::new(3, Ref::ZERO_INDEX);
        let one = Ref::new(3, Ref::ONE_INDEX);
        let node = Ref::new(3, 5);
        assert!(zero.is_constant());
        assert!(one.is_constant());
        assert!(!node.is_constant());
        assert_eq!(node.session(), 3);
        assert_eq!(node.index(), 5);
        assert_eq!(node.to_string(), "@5#3");
        assert_eq!(one.to_string(), "@1");
    }

    #[test]
    fn test_sessions_are_distinct() {
        assert_ne!(Ref::new(1, 5), Ref::new(2, 5));
        assert_ne!(Ref::new(1, Ref::ONE_INDEX), Ref::new(2, Ref::ONE_INDEX));
    }
}
