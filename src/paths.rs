//! Iterator over the paths of a diagram.
//!
//! Each yielded path is the list of `(variable, value)` decisions taken from
//! the root to the requested terminal, in rank order. Variables skipped by a
//! path are don't-cares, so one path can stand for many full assignments.
//!
//! # Example
//!
//! ```
//! use choice_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//! let x = bdd.new_variable("x").unwrap();
//! let y = bdd.new_variable("y").unwrap();
//!
//! // f = x XOR y (true when exactly one is true)
//! let f = bdd.xor(x, y).unwrap();
//!
//! let paths: Vec<_> = bdd.paths(f).collect();
//! assert_eq!(paths.len(), 2);
//! for path in &paths {
//!     println!("Satisfying assignment: {:?}", path);
//! }
//! ```
//!
//! The number of paths can be exponential in the number of variables.

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Variable;

impl Bdd {
    /// Returns an iterator over all paths to TRUE, high branches first.
    ///
    /// ```
    /// use choice_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    ///
    /// // Constant TRUE has exactly one path (the empty path)
    /// let paths: Vec<_> = bdd.paths(bdd.one()).collect();
    /// assert_eq!(paths.len(), 1);
    /// assert!(paths[0].is_empty());
    ///
    /// // Constant FALSE has no satisfying paths
    /// assert_eq!(bdd.paths(bdd.zero()).count(), 0);
    /// ```
    pub fn paths(&self, f: Ref) -> BddPaths<'_> {
        BddPaths::new(self, f, true)
    }

    /// Returns an iterator over all paths to FALSE.
    pub fn paths_to_false(&self, f: Ref) -> BddPaths<'_> {
        BddPaths::new(self, f, false)
    }
}

#[derive(Debug, Clone, Copy)]
enum Branch {
    High,
    Low,
}

#[derive(Debug)]
struct StackFrame {
    node: Ref,
    /// Which branch to explore next (None if both explored)
    next_branch: Option<Branch>,
}

/// An iterator over the paths of a diagram to one terminal.
///
/// Created by [`Bdd::paths()`] and [`Bdd::paths_to_false()`].
///
/// Depth-first with backtracking: the current path lives in a single vector
/// that grows and shrinks with the stack, and is only cloned when yielded.
pub struct BddPaths<'a> {
    bdd: &'a Bdd,
    goal: bool,
    stack: Vec<StackFrame>,
    current_path: Vec<(Variable, bool)>,
}

impl<'a> BddPaths<'a> {
    pub fn new(bdd: &'a Bdd, f: Ref, goal: bool) -> Self {
        BddPaths {
            bdd,
            goal,
            stack: vec![StackFrame {
                node: f,
                next_branch: Some(Branch::High),
            }],
            current_path: Vec::new(),
        }
    }

    fn backtrack(&mut self) {
        self.stack.pop();
        if !self.stack.is_empty() {
            self.current_path.pop();
        }
    }
}

impl Iterator for BddPaths<'_> {
    type Item = Vec<(Variable, bool)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;

            let (low, high) = match self.bdd.node(node) {
                Node::Constant(value) if value == self.goal => {
                    let result = self.current_path.clone();
                    self.backtrack();
                    return Some(result);
                }
                Node::Constant(_) => {
                    self.backtrack();
                    continue;
                }
                Node::Choice { low, high, .. } => (low, high),
            };

            let (value, child) = match frame.next_branch {
                Some(Branch::High) => {
                    frame.next_branch = Some(Branch::Low);
                    (true, high)
                }
                Some(Branch::Low) => {
                    frame.next_branch = None;
                    (false, low)
                }
                None => {
                    self.backtrack();
                    continue;
                }
            };

            let var = self.bdd.variable_of(node).expect("choice node has a declared variable");
            self.current_path.push((var, value));
            self.stack.push(StackFrame {
                node: child,
                next_branch: Some(Branch::High),
            });
        }
    }
}
