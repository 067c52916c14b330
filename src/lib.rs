//! # choice-bdd: canonical BDDs from a single combinator
//!
//! **`choice-bdd`** builds Reduced Ordered Binary Decision Diagrams (ROBDDs) on top of one
//! generalized if-then-else operation, [`choice`][crate::bdd::Bdd::choice], and uses them to
//! compile counting constraints ("at least / at most / exactly k of these") and to conjoin
//! many such constraints without blowing up.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All construction goes through the [`Bdd`][crate::bdd::Bdd]
//!   manager, which hash-conses every node. Two [`Ref`][crate::reference::Ref]s of one session are
//!   equal iff they denote the same Boolean function.
//! - **One primitive**: `choice(index, if0, if1)` selects between two functions under a third.
//!   Negation, conjunction, disjunction and the other connectives are one-line instances of it.
//! - **Cardinality gadgets**: [`at_least_n`][crate::bdd::Bdd::at_least_n],
//!   [`at_most_n`][crate::bdd::Bdd::at_most_n] and [`exactly`][crate::bdd::Bdd::exactly] build
//!   diagrams of size `O(n * k)`.
//! - **Aggregation**: [`aggregate`][crate::bdd::Bdd::aggregate] conjoins many constraints with a
//!   selectable [`Strategy`][crate::aggregate::Strategy], with cancellation and a node limit.
//! - **Sessions**: refs carry the id of the session that made them; mixing sessions is an error,
//!   not a silent alias.
//!
//! ## Basic Usage
//!
//! ```rust
//! use choice_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//!
//! let a = bdd.variable("a", 0u32).unwrap();
//! let b = bdd.variable("b", 1u32).unwrap();
//! let c = bdd.variable("c", 2u32).unwrap();
//!
//! // Exactly one of a, b, c
//! let one_hot = bdd.exactly(1, &[a, b, c]).unwrap();
//! assert_eq!(bdd.sat_count(one_hot, 3).to_string(), "3");
//!
//! // ... and not a
//! let not_a = bdd.negate(a).unwrap();
//! let f = bdd.aggregate(&[one_hot, not_a]).unwrap();
//! assert_eq!(bdd.paths(f).count(), 2);
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The [`Bdd`][crate::bdd::Bdd] manager, its configuration and the `choice` combinator.
//! - **[`threshold`]**: Cardinality gadgets.
//! - **[`aggregate`]**: Conjunction of many constraints.
//! - **[`sat`]** and **[`paths`]**: Model search, counting and enumeration.
//! - **[`dot`]** and **[`canonical`]**: Graphviz and text output.

pub mod aggregate;
pub mod bdd;
pub mod cache;
pub mod cancel;
pub mod canonical;
pub mod dot;
pub mod error;
pub mod eval;
pub mod node;
pub mod ordering;
pub mod paths;
pub mod reference;
pub mod sat;
pub mod store;
pub mod subtable;
pub mod threshold;
pub mod types;
