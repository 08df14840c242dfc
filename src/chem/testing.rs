//! Testing utilities for expression tree assertions
//!
//! A fluent API for asserting on parsed trees, making parser tests more
//! readable than chains of `children[0].subscript.as_deref().unwrap()`.
//!
//! # Example
//!
//! ```rust
//! use chemtyper::chem::parser::{parse_markup, NodeKind};
//! use chemtyper::chem::testing::assert_tree;
//!
//! let tree = parse_markup("H_{2}O");
//!
//! assert_tree(&tree)
//!     .child_count(2)
//!     .child(0, |h| {
//!         h.kind(NodeKind::Element)
//!             .value("H")
//!             .subscript(|sub| sub.text("2"));
//!     });
//! ```

use crate::chem::parser::{ExpressionNode, NodeKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parsed tree
pub fn assert_tree(root: &ExpressionNode) -> NodeAssertion<'_> {
    NodeAssertion {
        node: root,
        context: "root".to_string(),
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a ExpressionNode,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert the node kind
    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind, expected,
            "{}: Expected {} node, found {} ({})",
            self.context,
            expected,
            self.node.kind,
            self.node.display_label()
        );
        self
    }

    /// Assert the node value (symbol, digits, or command name)
    pub fn value(self, expected: &str) -> Self {
        assert_eq!(
            self.node.value, expected,
            "{}: Expected value '{}', found '{}'",
            self.context, expected, self.node.value
        );
        self
    }

    /// Assert the concatenated values of this node's leaves
    pub fn text(self, expected: &str) -> Self {
        let actual = leaf_text(self.node);
        assert_eq!(
            actual, expected,
            "{}: Expected text '{}', found '{}'",
            self.context, expected, actual
        );
        self
    }

    /// Assert the raw command arguments
    pub fn args(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.node.args.iter().map(String::as_str).collect();
        assert_eq!(
            actual, expected,
            "{}: Command arguments differ",
            self.context
        );
        self
    }

    /// Assert the number of children
    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.node.children)
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            self.node.children.len()
        );
        assertion(NodeAssertion {
            node: &self.node.children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert a subscript is attached and check it
    pub fn subscript<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(sub) = self.node.subscript.as_deref() else {
            panic!("{}: Expected a subscript, found none", self.context);
        };
        assertion(NodeAssertion {
            node: sub,
            context: format!("{}._", self.context),
        });
        self
    }

    /// Assert a superscript is attached and check it
    pub fn superscript<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(sup) = self.node.superscript.as_deref() else {
            panic!("{}: Expected a superscript, found none", self.context);
        };
        assertion(NodeAssertion {
            node: sup,
            context: format!("{}.^", self.context),
        });
        self
    }

    /// Assert neither script is attached
    pub fn no_scripts(self) -> Self {
        assert!(
            !self.node.has_scripts(),
            "{}: Expected no scripts on {}",
            self.context,
            self.node.display_label()
        );
        self
    }
}

fn leaf_text(node: &ExpressionNode) -> String {
    if node.children.is_empty() {
        node.value.clone()
    } else {
        node.children.iter().map(leaf_text).collect()
    }
}

fn summarize(children: &[ExpressionNode]) -> String {
    children
        .iter()
        .map(|child| format!("{}:{}", child.kind, child.display_label()))
        .collect::<Vec<_>>()
        .join(", ")
}
