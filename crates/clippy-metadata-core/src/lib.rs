//! Clippy lint metadata extraction
//!
//! Scans the Rust sources of a Clippy checkout for `declare_clippy_lint!`
//! invocations and builds a JSON catalog of the public lints, one record per
//! lint with its key, display name, documentation URL and description.

pub mod catalog;
pub mod collector;
pub mod config;
pub mod declaration;
pub mod extractor;
pub mod locator;
pub mod syntax;

pub use catalog::{Catalog, LintRecord};
pub use config::ExtractorConfig;
pub use declaration::Category;
pub use extractor::{ExtractError, Extractor, run};
