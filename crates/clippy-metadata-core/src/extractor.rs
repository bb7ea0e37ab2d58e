//! Extraction pipeline
//!
//! Drives collection, parsing, macro location and declaration parsing one
//! file at a time, and aggregates the results into a [`Catalog`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogError, LintRecord};
use crate::collector::{CollectionError, SourceCollector, SourceFile};
use crate::config::ExtractorConfig;
use crate::declaration::{Declaration, DeclarationParser};
use crate::locator::MacroLocator;
use crate::syntax::{RustSyntax, SyntaxError, SyntaxNode, TreeSitterNode};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Counters for one file or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub files: usize,
    /// Target macro invocations found.
    pub matched: usize,
    pub emitted: usize,
    /// Internal lints left out on purpose.
    pub excluded: usize,
    /// Public lints dropped by the category filter.
    pub filtered: usize,
    /// Malformed declarations, and files the parser gave up on.
    pub skipped: usize,
}

impl ExtractionStats {
    fn absorb(&mut self, other: &ExtractionStats) {
        self.files += other.files;
        self.matched += other.matched;
        self.emitted += other.emitted;
        self.excluded += other.excluded;
        self.filtered += other.filtered;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub records: Vec<LintRecord>,
    pub stats: ExtractionStats,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub catalog: Catalog,
    pub stats: ExtractionStats,
}

pub struct Extractor {
    config: ExtractorConfig,
    syntax: RustSyntax,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            config,
            syntax: RustSyntax::new()?,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn extract_source(&mut self, file: &SourceFile) -> FileReport {
        let mut report = FileReport {
            stats: ExtractionStats {
                files: 1,
                ..ExtractionStats::default()
            },
            ..FileReport::default()
        };

        let tree = match self.syntax.parse(&file.path, &file.text) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("{}", e);
                report.stats.skipped += 1;
                return report;
            }
        };
        if tree.has_errors() {
            debug!("{} contains syntax errors", file.path.display());
        }

        let locator = MacroLocator::new(&self.config.declaration.macro_name);
        let parser = DeclarationParser::new(&self.config);
        let catalog_config = &self.config.catalog;

        locator.walk(&tree.root(), &mut |invocation: &TreeSitterNode<'_>| {
            report.stats.matched += 1;
            match parser.parse(invocation) {
                Ok(Declaration::Public(record)) => {
                    if catalog_config.accepts(record.category()) {
                        report.stats.emitted += 1;
                        report.records.push(record);
                    } else {
                        debug!("Filtered {} ({})", record.key(), record.category());
                        report.stats.filtered += 1;
                    }
                }
                Ok(Declaration::Excluded { name, category }) => {
                    debug!("Excluded {} lint {}", category, name);
                    report.stats.excluded += 1;
                }
                Err(e) => {
                    warn!(
                        "Skipping declaration at {}:{}: {}",
                        file.path.display(),
                        invocation.line(),
                        e
                    );
                    report.stats.skipped += 1;
                }
            }
        });

        report
    }

    pub fn extract_dir(&mut self, root: &Path) -> Result<Extraction, ExtractError> {
        info!("Collecting Clippy lints from {}", root.display());

        let collector = SourceCollector::new(root, &self.config.source.suffix)?;
        let mut extraction = Extraction::default();

        for file in collector {
            let file = file?;
            debug!("Processing {}", file.path.display());

            let report = self.extract_source(&file);
            debug!(
                "Found {} lints in {}",
                report.records.len(),
                file.path.display()
            );

            extraction.stats.absorb(&report.stats);
            extraction.catalog.extend(report.records);
        }

        info!(
            "Found {} lints in {} files ({} internal, {} filtered, {} skipped)",
            extraction.stats.emitted,
            extraction.stats.files,
            extraction.stats.excluded,
            extraction.stats.filtered,
            extraction.stats.skipped
        );
        for key in extraction.catalog.duplicate_keys() {
            warn!("Lint {} is declared more than once", key);
        }

        Ok(extraction)
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: ExtractionStats,
}

/// Extracts the catalog below `root` and writes it to `output`.
///
/// The output file is only touched once every source file has been
/// processed.
pub fn run(
    root: &Path,
    output: &Path,
    config: ExtractorConfig,
) -> Result<RunSummary, ExtractError> {
    let mut extractor = Extractor::new(config)?;
    let extraction = extractor.extract_dir(root)?;

    extraction.catalog.write_to(output)?;
    info!("Saved metadata to {}", output.display());

    Ok(RunSummary {
        output: output.to_path_buf(),
        stats: extraction.stats,
    })
}
