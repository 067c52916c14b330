//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Terminal nodes** (0 and 1) are drawn once, as squares at the bottom (sink rank),
//!   and shared by every edge that reaches them
//! - **Choice nodes** are circles labeled with the variable name, grouped by rank
//! - **Edges**: solid lines are high (if1) edges, dashed lines are low (if0) edges
//! - **Root nodes** are rectangles at the top (source rank)
//!
//! Nodes are visited breadth-first from the roots, so the output is
//! deterministic for a given set of roots.
//!
//! # Examples
//!
//! ```
//! use choice_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//! let x1 = bdd.new_variable("x1").unwrap();
//! let x2 = bdd.new_variable("x2").unwrap();
//! let f = bdd.and(x1, x2).unwrap();
//!
//! let dot = bdd.to_dot(&[f]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Rank;

/// Configuration options for DOT output generation.
///
/// ```
/// use choice_bdd::bdd::Bdd;
/// use choice_bdd::dot::DotConfig;
///
/// let bdd = Bdd::default();
/// let x = bdd.new_variable("x").unwrap();
/// let config = DotConfig {
///     node_shape: "ellipse",
///     show_ranks: true,
///     ..DotConfig::default()
/// };
///
/// let dot = bdd.to_dot_with_config(&[x], &config).unwrap();
/// assert!(dot.contains("x.0"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for choice nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for high (if1) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (if0) edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Append the rank to node labels, as in `name.rank` (default: false)
    pub show_ranks: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            show_ranks: false,
        }
    }
}

impl Bdd {
    /// Converts the diagrams rooted at `roots` to DOT format.
    ///
    /// Shared nodes are drawn once, also across roots.
    ///
    /// ```
    /// use choice_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.new_variable("x").unwrap();
    /// let y = bdd.new_variable("y").unwrap();
    ///
    /// let and = bdd.and(x, y).unwrap();
    /// let or = bdd.or(x, y).unwrap();
    /// let xor = bdd.xor(x, y).unwrap();
    ///
    /// let dot = bdd.to_dot(&[and, or, xor]).unwrap();
    /// println!("{}", dot);
    /// ```
    pub fn to_dot(&self, roots: &[Ref]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, roots: &[Ref], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        // Terminal nodes (0 and 1)
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.terminal_shape)?;
        writeln!(dot, "1 [shape={}, label=\"1\"];", config.terminal_shape)?;
        writeln!(dot, "}}")?;

        let order = self.breadth_first(roots);

        // Group choice nodes by rank for layout
        let mut levels = BTreeMap::<Rank, Vec<Ref>>::new();
        for &node in order.iter() {
            if let Node::Choice { rank, .. } = self.node(node) {
                levels.entry(rank).or_default().push(node);
            }
        }

        for (&rank, level) in levels.iter() {
            let name = self.var(rank).map(|v| escape_label(v.name())).unwrap_or_default();
            let label = if config.show_ranks {
                format!("{}.{}", name, rank.index())
            } else {
                name
            };
            writeln!(dot, "{{ rank=same")?;
            for node in level {
                writeln!(dot, "{} [label=\"{}\"];", node.index(), label)?;
            }
            writeln!(dot, "}}")?;
        }

        for &node in order.iter() {
            if let Node::Choice { low, high, .. } = self.node(node) {
                writeln!(dot, "{} -- {} [style={}];", node.index(), high.index(), config.high_edge_style)?;
                writeln!(dot, "{} -- {} [style={}];", node.index(), low.index(), config.low_edge_style)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;

        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.index())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    /// Nodes reachable from `roots` in breadth-first order, each once.
    fn breadth_first(&self, roots: &[Ref]) -> Vec<Ref> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<Ref> = roots.iter().copied().collect();
        let mut order = Vec::new();

        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node);
            if let Node::Choice { low, high, .. } = self.node(node) {
                queue.push_back(low);
                queue.push_back(high);
            }
        }

        order
    }
}

/// Escapes `s` for use inside a double-quoted DOT string.
fn escape_label(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn edges(dot: &str) -> usize {
        dot.lines().filter(|line| line.contains(" -- ") && !line.starts_with('r')).count()
    }

    #[test]
    fn test_to_dot_basic() {
        let bdd = Bdd::default();
        let x1 = bdd.new_variable("x1").unwrap();
        let x2 = bdd.new_variable("x2").unwrap();
        let f = bdd.and(x1, bdd.negate(x2).unwrap()).unwrap();

        let dot = bdd.to_dot(&[f]).unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"x1\""));
        assert!(dot.contains("label=\"x2\""));
        // Two choice nodes, two edges each
        assert_eq!(edges(&dot), 4);
    }

    #[test]
    fn test_to_dot_shares_nodes_across_roots() {
        let bdd = Bdd::default();
        let x = bdd.new_variable("x").unwrap();
        let y = bdd.new_variable("y").unwrap();
        let and = bdd.and(x, y).unwrap();
        let or = bdd.or(x, y).unwrap();

        // x AND y, x OR y and y: three choice nodes, y is shared
        let dot = bdd.to_dot(&[and, or, y]).unwrap();
        assert_eq!(edges(&dot), 6);
        assert_eq!(dot.matches("[label=\"y\"]").count(), 1);
        assert!(dot.contains("r2 -- "));
    }

    #[test]
    fn test_to_dot_constants() {
        let bdd = Bdd::default();
        let dot = bdd.to_dot(&[bdd.zero(), bdd.one()]).unwrap();
        assert_eq!(edges(&dot), 0);
        assert!(dot.contains("r0 -- 0;"));
        assert!(dot.contains("r1 -- 1;"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let bdd = Bdd::default();
        let x = bdd.variable("x", 4u32).unwrap();

        let config = DotConfig {
            show_ranks: true,
            low_edge_style: "dotted",
            ..DotConfig::default()
        };

        let dot = bdd.to_dot_with_config(&[x], &config).unwrap();
        assert!(dot.contains("label=\"x.4\""));
        assert!(dot.contains("style=dotted"));
    }

    #[test]
    fn test_label_escaping() {
        let bdd = Bdd::default();
        let x = bdd.new_variable("say \"hi\" \\ bye").unwrap();

        let dot = bdd.to_dot(&[x]).unwrap();
        assert!(dot.contains(r#"label="say \"hi\" \\ bye""#));
        assert_eq!(escape_label("a\nb"), r"a\nb");
    }

    /// Writes a DOT file for manual inspection.
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let bdd = Bdd::default();
        let vars: Vec<Ref> = (0..4).map(|i| bdd.new_variable(&format!("x{}", i)).unwrap()).collect();
        let f = bdd.exactly(2, &vars).unwrap();

        let dot = bdd.to_dot(&[f]).unwrap();
        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}
