//! Lint declaration parsing
//!
//! Interprets the argument token tree of a `declare_clippy_lint!` invocation:
//!
//! ```text
//! declare_clippy_lint! {
//!     /// docs...
//!     #[clippy::version = "1.40.0"]
//!     pub NAME,
//!     category,
//!     "message"
//! }
//! ```
//!
//! Only the window right after the visibility marker is interpreted, see
//! [`DECLARATION_WINDOW`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::LintRecord;
use crate::config::{DescriptionSource, ExtractorConfig};
use crate::syntax::{SyntaxNode, kinds};

/// Position of the invocation's argument token tree among its children
/// (`<name> ! <token_tree>`).
pub const ARGUMENTS_INDEX: usize = 2;

/// One expected token following the visibility marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Name,
    Separator,
    Category,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Name => write!(f, "lint name"),
            Slot::Separator => write!(f, "','"),
            Slot::Category => write!(f, "lint category"),
        }
    }
}

/// Tokens expected after `pub`, in order: `pub <NAME> , <category>`.
pub const DECLARATION_WINDOW: [Slot; 3] = [Slot::Name, Slot::Separator, Slot::Category];

/// Distance from the visibility marker to the category token.
pub const CATEGORY_OFFSET: usize = DECLARATION_WINDOW.len();

const _: () = assert!(matches!(
    DECLARATION_WINDOW[CATEGORY_OFFSET - 1],
    Slot::Category
));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Correctness,
    Suspicious,
    Style,
    Complexity,
    Perf,
    Pedantic,
    Restriction,
    Nursery,
    Cargo,
    Internal,
    InternalWarn,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Correctness,
        Category::Suspicious,
        Category::Style,
        Category::Complexity,
        Category::Perf,
        Category::Pedantic,
        Category::Restriction,
        Category::Nursery,
        Category::Cargo,
        Category::Internal,
        Category::InternalWarn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Correctness => "correctness",
            Category::Suspicious => "suspicious",
            Category::Style => "style",
            Category::Complexity => "complexity",
            Category::Perf => "perf",
            Category::Pedantic => "pedantic",
            Category::Restriction => "restriction",
            Category::Nursery => "nursery",
            Category::Cargo => "cargo",
            Category::Internal => "internal",
            Category::InternalWarn => "internal_warn",
        }
    }

    /// Internal lints are never published in the catalog.
    pub fn is_internal(&self) -> bool {
        matches!(self, Category::Internal)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lint category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("expected a token tree as macro argument, found {found}")]
    NotTokenTree { found: String },
    #[error("no `{marker}` token in lint declaration")]
    MissingVisibility { marker: String },
    #[error("declaration ends before the {slot}")]
    Truncated { slot: Slot },
    #[error("expected {slot}, found '{found}'")]
    UnexpectedToken { slot: Slot, found: String },
    #[error("unknown category '{found}' for lint {name}")]
    UnknownCategory { name: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Public(LintRecord),
    /// Deliberately left out of the catalog.
    Excluded { name: String, category: Category },
}

/// A located invocation with its argument token tree.
#[derive(Debug)]
pub struct MacroMatch<'n, N> {
    pub invocation: &'n N,
    pub arguments: N,
}

impl<'n, N: SyntaxNode> MacroMatch<'n, N> {
    pub fn resolve(invocation: &'n N) -> Result<Self, DeclarationError> {
        let arguments =
            invocation
                .child(ARGUMENTS_INDEX)
                .ok_or_else(|| DeclarationError::NotTokenTree {
                    found: "nothing".to_string(),
                })?;
        if arguments.kind() != kinds::TOKEN_TREE {
            return Err(DeclarationError::NotTokenTree {
                found: format!("'{}'", arguments.kind()),
            });
        }

        Ok(Self {
            invocation,
            arguments,
        })
    }
}

pub struct DeclarationParser<'c> {
    config: &'c ExtractorConfig,
}

impl<'c> DeclarationParser<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn parse<N: SyntaxNode>(&self, invocation: &N) -> Result<Declaration, DeclarationError> {
        let found = MacroMatch::resolve(invocation)?;
        let tokens = found.arguments.children();
        let marker = self.config.declaration.visibility_marker.as_str();
        let pub_index = tokens
            .iter()
            .position(|token| token.text() == marker)
            .ok_or_else(|| DeclarationError::MissingVisibility {
                marker: marker.to_string(),
            })?;

        let mut name: &str = "";
        let mut category_text: &str = "";
        for (offset, slot) in DECLARATION_WINDOW.iter().enumerate() {
            let token = tokens
                .get(pub_index + 1 + offset)
                .ok_or(DeclarationError::Truncated { slot: *slot })?;
            check_slot(*slot, token)?;
            match slot {
                Slot::Name => name = token.text(),
                Slot::Category => category_text = token.text(),
                Slot::Separator => {}
            }
        }

        let category: Category =
            category_text
                .parse()
                .map_err(|_| DeclarationError::UnknownCategory {
                    name: name.to_string(),
                    found: category_text.to_string(),
                })?;

        if category.is_internal() {
            return Ok(Declaration::Excluded {
                name: name.to_string(),
                category,
            });
        }

        let catalog = &self.config.catalog;
        let key = name.to_lowercase();
        let description = match catalog.description {
            DescriptionSource::Template => None,
            DescriptionSource::DocComments => doc_description(&tokens),
        }
        .unwrap_or_else(|| catalog.render_description(&key));

        Ok(Declaration::Public(LintRecord::new(
            name,
            category,
            &catalog.base_url,
            description,
        )))
    }
}

fn check_slot<N: SyntaxNode>(slot: Slot, token: &N) -> Result<(), DeclarationError> {
    let matches = match slot {
        Slot::Name | Slot::Category => token.kind() == kinds::IDENTIFIER,
        Slot::Separator => token.text() == ",",
    };
    if matches {
        Ok(())
    } else {
        Err(DeclarationError::UnexpectedToken {
            slot,
            found: token.text().to_string(),
        })
    }
}

/// Joins the line comments of a declaration into a description.
fn doc_description<N: SyntaxNode>(tokens: &[N]) -> Option<String> {
    let lines: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind() == kinds::LINE_COMMENT)
        .map(|token| token.text().trim_end().trim_start_matches('/').trim())
        .collect();

    if lines.iter().all(|line| line.is_empty()) {
        return None;
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use crate::syntax::fake::FakeNode;

    fn parse(tokens: &[&str]) -> Result<Declaration, DeclarationError> {
        let config = ExtractorConfig::default();
        DeclarationParser::new(&config).parse(&FakeNode::declaration(tokens))
    }

    fn public(tokens: &[&str]) -> LintRecord {
        match parse(tokens) {
            Ok(Declaration::Public(record)) => record,
            other => panic!("Expected public declaration, got {:?}", other),
        }
    }

    #[test]
    fn category_offset_points_at_category_slot() {
        assert_eq!(CATEGORY_OFFSET, 3);
    }

    #[test]
    fn parses_public_declaration() {
        let record = public(&[
            "{",
            "pub",
            "SUSPICIOUS_ELSE_FORMATTING",
            ",",
            "style",
            ",",
            "\"msg\"",
            "}",
        ]);

        assert_eq!(record.key(), "suspicious_else_formatting");
        assert_eq!(record.name(), "suspicious_else_formatting");
        assert_eq!(
            record.url(),
            format!("{}#suspicious_else_formatting", DEFAULT_BASE_URL)
        );
        assert_eq!(
            record.description(),
            "Clippy lint <code>suspicious_else_formatting</code>."
        );
        assert_eq!(record.category(), Category::Style);
    }

    #[test]
    fn leading_docs_and_attributes_are_skipped() {
        let record = public(&[
            "{",
            "/// ### What it does",
            "#",
            "[clippy::version = \"1.40.0\"]",
            "pub",
            "ALMOST_SWAPPED",
            ",",
            "correctness",
            ",",
            "\"msg\"",
            "}",
        ]);

        assert_eq!(record.key(), "almost_swapped");
        assert_eq!(record.category(), Category::Correctness);
    }

    #[test]
    fn internal_category_is_excluded() {
        let result = parse(&[
            "{",
            "pub",
            "UNUSED_IO_AMOUNT",
            ",",
            "internal",
            ",",
            "\"msg\"",
            "}",
        ]);

        assert_eq!(
            result,
            Ok(Declaration::Excluded {
                name: "UNUSED_IO_AMOUNT".to_string(),
                category: Category::Internal,
            })
        );
    }

    #[test]
    fn internal_warn_is_published() {
        let record = public(&[
            "{",
            "pub",
            "LINT_AUTHOR",
            ",",
            "internal_warn",
            ",",
            "\"msg\"",
            "}",
        ]);

        assert_eq!(record.category(), Category::InternalWarn);
    }

    #[test]
    fn non_token_tree_argument_is_rejected() {
        let invocation = FakeNode::invocation(
            "declare_clippy_lint",
            FakeNode::leaf("string_literal", "\"oops\""),
        );
        let config = ExtractorConfig::default();

        let result = DeclarationParser::new(&config).parse(&invocation);

        assert_eq!(
            result,
            Err(DeclarationError::NotTokenTree {
                found: "'string_literal'".to_string()
            })
        );
    }

    #[test]
    fn resolve_returns_argument_token_tree() {
        let invocation = FakeNode::declaration(&["{", "pub", "FOO", ",", "style", "}"]);

        let found = MacroMatch::resolve(&invocation).unwrap();

        assert_eq!(found.arguments.kind(), kinds::TOKEN_TREE);
        assert_eq!(found.arguments.children().len(), 6);
        assert_eq!(found.invocation, &invocation);
    }

    #[test]
    fn missing_argument_is_rejected() {
        let invocation = FakeNode::branch(
            kinds::MACRO_INVOCATION,
            vec![
                FakeNode::leaf(kinds::IDENTIFIER, "declare_clippy_lint")
                    .with_field(kinds::MACRO_FIELD),
            ],
        );
        let config = ExtractorConfig::default();

        let result = DeclarationParser::new(&config).parse(&invocation);

        assert!(matches!(result, Err(DeclarationError::NotTokenTree { .. })));
    }

    #[test]
    fn missing_visibility_marker_is_rejected() {
        let result = parse(&["{", "FOO", ",", "style", ",", "\"msg\"", "}"]);

        assert_eq!(
            result,
            Err(DeclarationError::MissingVisibility {
                marker: "pub".to_string()
            })
        );
    }

    #[test]
    fn truncated_window_is_rejected() {
        let result = parse(&["{", "pub", "FOO", ","]);

        assert_eq!(
            result,
            Err(DeclarationError::Truncated {
                slot: Slot::Category
            })
        );
    }

    #[test]
    fn shifted_window_fails_instead_of_misclassifying() {
        let result = parse(&["{", "pub", "FOO", "style", ",", "\"msg\"", "}"]);

        assert_eq!(
            result,
            Err(DeclarationError::UnexpectedToken {
                slot: Slot::Separator,
                found: "style".to_string(),
            })
        );
    }

    #[test]
    fn string_in_category_position_is_rejected() {
        let result = parse(&["{", "pub", "FOO", ",", "\"style\"", "}"]);

        assert!(matches!(
            result,
            Err(DeclarationError::UnexpectedToken {
                slot: Slot::Category,
                ..
            })
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = parse(&["{", "pub", "FOO", ",", "stylish", ",", "\"msg\"", "}"]);

        assert_eq!(
            result,
            Err(DeclarationError::UnknownCategory {
                name: "FOO".to_string(),
                found: "stylish".to_string(),
            })
        );
    }

    #[test]
    fn first_visibility_marker_wins() {
        let record = public(&[
            "{", "pub", "FIRST", ",", "perf", ",", "pub", "SECOND", "}",
        ]);

        assert_eq!(record.key(), "first");
    }

    #[test]
    fn custom_base_url_and_template() {
        let mut config = ExtractorConfig::default();
        config.catalog.base_url = "https://example.com/lints".to_string();
        config.catalog.description_template = "Lint {key}".to_string();
        let node = FakeNode::declaration(&["{", "pub", "FOO", ",", "nursery", "}"]);

        let result = DeclarationParser::new(&config).parse(&node).unwrap();

        match result {
            Declaration::Public(record) => {
                assert_eq!(record.url(), "https://example.com/lints#foo");
                assert_eq!(record.description(), "Lint foo");
            }
            other => panic!("Expected public declaration, got {:?}", other),
        }
    }

    #[test]
    fn doc_comments_become_description() {
        let mut config = ExtractorConfig::default();
        config.catalog.description = DescriptionSource::DocComments;
        let node = FakeNode::declaration(&[
            "{",
            "/// ### What it does",
            "/// Checks for `foo`.",
            "///",
            "/// ### Why is this bad?",
            "pub",
            "FOO",
            ",",
            "style",
            "}",
        ]);

        let result = DeclarationParser::new(&config).parse(&node).unwrap();

        match result {
            Declaration::Public(record) => assert_eq!(
                record.description(),
                "### What it does\nChecks for `foo`.\n\n### Why is this bad?"
            ),
            other => panic!("Expected public declaration, got {:?}", other),
        }
    }

    #[test]
    fn doc_comments_fall_back_to_template() {
        let mut config = ExtractorConfig::default();
        config.catalog.description = DescriptionSource::DocComments;
        let node = FakeNode::declaration(&["{", "pub", "FOO", ",", "style", "}"]);

        let result = DeclarationParser::new(&config).parse(&node).unwrap();

        match result {
            Declaration::Public(record) => {
                assert_eq!(record.description(), "Clippy lint <code>foo</code>.")
            }
            other => panic!("Expected public declaration, got {:?}", other),
        }
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Style".parse::<Category>().is_err());
    }
}
