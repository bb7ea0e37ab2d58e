//! Configuration loading and parsing for the extractor
//!
//! Provides functionality to load and parse `clippy-metadata.toml` configuration files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::declaration::Category;

pub const CONFIG_FILENAME: &str = "clippy-metadata.toml";

pub const DEFAULT_BASE_URL: &str = "https://rust-lang.github.io/rust-clippy/master/index.html";
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = "Clippy lint <code>{key}</code>.";

/// Placeholder substituted with the lint key in description templates.
pub const KEY_PLACEHOLDER: &str = "{key}";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["source", "declaration", "catalog"];
const KNOWN_SOURCE_KEYS: &[&str] = &["suffix"];
const KNOWN_DECLARATION_KEYS: &[&str] = &["macro_name", "visibility_marker"];
const KNOWN_CATALOG_KEYS: &[&str] = &[
    "base_url",
    "description_template",
    "description",
    "categories",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{}': {message}", path.display())]
    ParseError { path: PathBuf, message: String },
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: ExtractorConfig,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    pub source: SourceConfig,
    pub declaration: DeclarationConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// File name suffix of the files to scan.
    pub suffix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            suffix: ".rs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeclarationConfig {
    pub macro_name: String,
    pub visibility_marker: String,
}

impl Default for DeclarationConfig {
    fn default() -> Self {
        Self {
            macro_name: "declare_clippy_lint".to_string(),
            visibility_marker: "pub".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub description_template: String,
    pub description: DescriptionSource,
    /// Only lints of these categories are emitted. Empty means all of them.
    pub categories: Vec<Category>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            description_template: DEFAULT_DESCRIPTION_TEMPLATE.to_string(),
            description: DescriptionSource::default(),
            categories: Vec::new(),
        }
    }
}

impl CatalogConfig {
    pub fn accepts(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    pub fn render_description(&self, key: &str) -> String {
        self.description_template.replace(KEY_PLACEHOLDER, key)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptionSource {
    #[default]
    Template,
    DocComments,
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("source.suffix", &self.source.suffix),
            ("declaration.macro_name", &self.declaration.macro_name),
            (
                "declaration.visibility_marker",
                &self.declaration.visibility_marker,
            ),
            ("catalog.base_url", &self.catalog.base_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("'{}' must not be empty", name),
                });
            }
        }

        if !self.catalog.description_template.contains(KEY_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "'catalog.description_template' must contain the {} placeholder",
                    KEY_PLACEHOLDER
                ),
            });
        }

        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<ExtractorConfig, ConfigError> {
    let content = read_config(path)?;
    parse_config(path, &content)
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = read_config(path)?;
    let config = parse_config(path, &content)?;
    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult { config, warnings })
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_config(path: &Path, content: &str) -> Result<ExtractorConfig, ConfigError> {
    let config: ExtractorConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    config.validate()?;
    Ok(config)
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    let sections = [
        ("source", KNOWN_SOURCE_KEYS),
        ("declaration", KNOWN_DECLARATION_KEYS),
        ("catalog", KNOWN_CATALOG_KEYS),
    ];
    for (section, known_keys) in sections {
        if let Some(toml::Value::Table(values)) = table.get(section) {
            let known: HashSet<&str> = known_keys.iter().copied().collect();
            for key in values.keys() {
                if !known.contains(key.as_str()) {
                    warnings.push(format!(
                        "Unknown config option in [{}]: '{}'",
                        section, key
                    ));
                }
            }
        }
    }

    warnings
}

/// Looks for a config file from `start_dir` upwards; defaults when none exists.
pub fn load_config_or_default_with_warnings(
    start_dir: &Path,
) -> Result<ConfigResult, ConfigError> {
    match find_config_file(start_dir) {
        Some(path) => load_config_with_warnings(&path),
        None => Ok(ConfigResult::default()),
    }
}
