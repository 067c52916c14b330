//! Ranks and named variables.
//!
//! A [`Rank`] fixes the position of a variable in the global descent order:
//! every interior node has a strictly smaller rank than both of its children.
//! Constants sit below every variable, at [`Rank::TERMINAL`].

use std::fmt;

/// Position of a variable in the descent order (0 is the topmost).
///
/// # Invariants
///
/// - Ranks are unique within a session and never change once assigned
/// - [`Rank::TERMINAL`] is reserved for the two constants and sorts after every variable
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(u32);

impl Rank {
    /// Rank of the constant nodes ("+infinity").
    pub const TERMINAL: Rank = Rank(u32::MAX);

    /// Creates a rank with the given index.
    pub const fn new(index: u32) -> Self {
        Rank(index)
    }

    /// Returns the raw rank index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true for the constants' rank.
    pub const fn is_terminal(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the rank directly below this one, unless that is [`Rank::TERMINAL`].
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Rank).filter(|rank| !rank.is_terminal())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "R∞")
        } else {
            write!(f, "R{}", self.0)
        }
    }
}

impl From<u32> for Rank {
    fn from(index: u32) -> Self {
        Rank(index)
    }
}

impl From<Rank> for u32 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// A named decision variable.
///
/// Variables are totally ordered by rank; the name is only a label.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Variable {
    name: String,
    rank: Rank,
}

impl Variable {
    pub fn new(name: impl Into<String>, rank: Rank) -> Self {
        Self { name: name.into(), rank }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank).then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        let r0 = Rank::new(0);
        let r1 = r0.next().unwrap();
        assert!(r0 < r1);
        assert!(r1 < Rank::TERMINAL);
        assert!(Rank::TERMINAL.is_terminal());
        assert!(!r1.is_terminal());
        assert_eq!(r1.index(), 1);
        assert_eq!(Rank::new(u32::MAX - 1).next(), None);
        assert_eq!(Rank::TERMINAL.next(), None);
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::new(7).to_string(), "R7");
        assert_eq!(Rank::TERMINAL.to_string(), "R∞");
    }

    #[test]
    fn test_variable_order_by_rank() {
        let a = Variable::new("z", Rank::new(0));
        let b = Variable::new("a", Rank::new(1));
        assert!(a < b);
        assert_eq!(a.to_string(), "z");
        assert_eq!(b.rank(), Rank::new(1));
    }
}
