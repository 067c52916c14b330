//! Canonical text form.
//!
//! `"0"` and `"1"` for the constants, `name(<if0>,<if1>)` for choice nodes.
//! Shared sub-diagrams are printed in full at every use, so the text grows
//! with the number of paths, not nodes. Within one session, two refs are
//! equal iff their strings are.

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;

enum Emit {
    Node(Ref),
    Text(&'static str),
}

impl Bdd {
    pub fn to_canonical_string(&self, f: Ref) -> String {
        let mut out = String::new();
        let mut stack = vec![Emit::Node(f)];

        while let Some(item) = stack.pop() {
            let node = match item {
                Emit::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                Emit::Node(node) => node,
            };
            match self.node(node) {
                Node::Constant(false) => out.push('0'),
                Node::Constant(true) => out.push('1'),
                Node::Choice { low, high, .. } => {
                    let var = self.variable_of(node).expect("choice node has a declared variable");
                    out.push_str(var.name());
                    out.push('(');
                    stack.push(Emit::Text(")"));
                    stack.push(Emit::Node(high));
                    stack.push(Emit::Text(","));
                    stack.push(Emit::Node(low));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_constants() {
        let bdd = Bdd::default();
        assert_eq!(bdd.to_canonical_string(bdd.zero()), "0");
        assert_eq!(bdd.to_canonical_string(bdd.one()), "1");
    }

    #[test]
    fn test_variable_and_negation() {
        let bdd = Bdd::default();
        let a = bdd.variable("a", 0u32).unwrap();
        assert_eq!(bdd.to_canonical_string(a), "a(0,1)");
        assert_eq!(bdd.to_canonical_string(bdd.negate(a).unwrap()), "a(1,0)");
    }

    #[test]
    fn test_conjunction() {
        let bdd = Bdd::default();
        let a = bdd.variable("a", 0u32).unwrap();
        let b = bdd.variable("b", 1u32).unwrap();
        let f = bdd.choice(a, bdd.zero(), b).unwrap();
        assert_eq!(bdd.to_canonical_string(f), "a(0,b(0,1))");
        assert_eq!(bdd.to_canonical_string(bdd.or(a, b).unwrap()), "a(b(0,1),1)");
    }

    #[test]
    fn test_equal_strings_iff_equal_refs() {
        let bdd = Bdd::default();
        let a = bdd.variable("a", 0u32).unwrap();
        let b = bdd.variable("b", 1u32).unwrap();

        let f = bdd.xor(a, b).unwrap();
        let g = bdd.or(bdd.and(a, bdd.negate(b).unwrap()).unwrap(), bdd.and(bdd.negate(a).unwrap(), b).unwrap()).unwrap();
        assert_eq!(f, g);
        assert_eq!(bdd.to_canonical_string(f), bdd.to_canonical_string(g));

        let h = bdd.equiv(a, b).unwrap();
        assert_ne!(bdd.to_canonical_string(f), bdd.to_canonical_string(h));
    }

    #[test]
    fn test_deep_chain() {
        let n = 10_000;
        let bdd = Bdd::default();
        let vars: Vec<Ref> = (0..n).map(|i| bdd.new_variable(&format!("x{}", i)).unwrap()).collect();
        let f = bdd.and_many(vars.iter().rev().copied()).unwrap();

        let text = bdd.to_canonical_string(f);
        assert!(text.starts_with("x0(0,x1(0,x2(0,"));
        assert!(text.ends_with(&format!("x{}(0,1){}", n - 1, ")".repeat(n - 1))));
    }
}
