//! Syntax tree access for Rust source files
//!
//! The extractor only needs a handful of node accessors, so the grammar is
//! hidden behind the [`SyntaxNode`] trait. [`RustSyntax`] provides the
//! tree-sitter backed implementation used in production.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

/// Node kinds of the tree-sitter Rust grammar the extractor relies on.
pub mod kinds {
    pub const MACRO_INVOCATION: &str = "macro_invocation";
    pub const TOKEN_TREE: &str = "token_tree";
    pub const IDENTIFIER: &str = "identifier";
    pub const LINE_COMMENT: &str = "line_comment";

    /// Field holding the invoked macro's path on a `macro_invocation`.
    pub const MACRO_FIELD: &str = "macro";
}

pub trait SyntaxNode: Sized {
    /// Grammar production tag, e.g. `macro_invocation`.
    fn kind(&self) -> &str;

    /// Source text covered by the node.
    fn text(&self) -> &str;

    fn children(&self) -> Vec<Self>;

    fn child_by_field(&self, field: &str) -> Option<Self>;

    /// 1-based line of the first byte of the node.
    fn line(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self> {
        self.children().into_iter().nth(index)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Failed to load the Rust grammar: {message}")]
    Language { message: String },
    #[error("Parser gave up on '{}'", path.display())]
    ParseAborted { path: PathBuf },
}

pub struct RustSyntax {
    parser: Parser,
}

impl std::fmt::Debug for RustSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustSyntax").finish_non_exhaustive()
    }
}

impl RustSyntax {
    pub fn new() -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| SyntaxError::Language {
                message: format!("{:?}", e),
            })?;
        Ok(Self { parser })
    }

    pub fn parse<'s>(
        &mut self,
        path: &Path,
        source: &'s str,
    ) -> Result<SyntaxTree<'s>, SyntaxError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SyntaxError::ParseAborted {
                path: path.to_path_buf(),
            })?;
        Ok(SyntaxTree { tree, source })
    }
}

/// A parsed file. Owns the tree; borrows the source it was parsed from.
pub struct SyntaxTree<'s> {
    tree: Tree,
    source: &'s str,
}

impl<'s> SyntaxTree<'s> {
    pub fn root(&self) -> TreeSitterNode<'_> {
        TreeSitterNode {
            node: self.tree.root_node(),
            source: self.source,
        }
    }

    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeSitterNode<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> TreeSitterNode<'t> {
    fn wrap(&self, node: Node<'t>) -> Self {
        Self {
            node,
            source: self.source,
        }
    }
}

impl SyntaxNode for TreeSitterNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|node| self.wrap(node))
            .collect()
    }

    fn child_by_field(&self, field: &str) -> Option<Self> {
        self.node
            .child_by_field_name(field)
            .map(|node| self.wrap(node))
    }

    fn line(&self) -> usize {
        self.node.start_position().row + 1
    }
}
