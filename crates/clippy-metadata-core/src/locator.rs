//! Macro invocation locator
//!
//! Depth-first, pre-order search for lint declaration macros. A matching
//! invocation ends the search in its subtree.

use crate::syntax::{SyntaxNode, kinds};

/// What the traversal does at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Target macro invocation: report it and skip its children.
    Match,
    /// Anything else: visit the children, left to right.
    Descend,
}

pub struct MacroLocator<'a> {
    macro_name: &'a str,
}

impl<'a> MacroLocator<'a> {
    pub fn new(macro_name: &'a str) -> Self {
        Self { macro_name }
    }

    pub fn classify<N: SyntaxNode>(&self, node: &N) -> Traversal {
        if node.kind() != kinds::MACRO_INVOCATION {
            return Traversal::Descend;
        }

        match node.child_by_field(kinds::MACRO_FIELD) {
            Some(name) if name.text() == self.macro_name => Traversal::Match,
            _ => Traversal::Descend,
        }
    }

    /// Calls `on_match` for every target invocation under `node`, in
    /// source order.
    pub fn walk<N, F>(&self, node: &N, on_match: &mut F)
    where
        N: SyntaxNode,
        F: FnMut(&N),
    {
        match self.classify(node) {
            Traversal::Match => on_match(node),
            Traversal::Descend => {
                for child in node.children() {
                    self.walk(&child, on_match);
                }
            }
        }
    }
}
