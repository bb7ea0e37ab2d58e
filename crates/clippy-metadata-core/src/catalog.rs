//! Lint catalog aggregation and emission
//!
//! Collects lint records in discovery order and writes them as a
//! pretty-printed JSON array consumed by rule-repository packaging.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::declaration::Category;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write catalog to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Metadata of one public lint.
///
/// `key` is always lowercase and non-empty, `name` equals `key` and `url`
/// is `<base>#<key>`. Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintRecord {
    key: String,
    name: String,
    url: String,
    description: String,
    #[serde(skip)]
    category: Category,
}

impl LintRecord {
    pub(crate) fn new(
        raw_name: &str,
        category: Category,
        base_url: &str,
        description: String,
    ) -> Self {
        let key = raw_name.to_lowercase();
        Self {
            url: format!("{}#{}", base_url, key),
            name: key.clone(),
            key,
            description,
            category,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<LintRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LintRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = LintRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[LintRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keys declared more than once, in order of first appearance.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.key()).or_default() += 1;
        }

        let mut duplicates = Vec::new();
        for record in &self.records {
            let key = record.key();
            if counts.get(key).copied().unwrap_or(0) > 1 && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Replaces the file at `path` with the serialized catalog.
    pub fn write_to(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| CatalogError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl FromIterator<LintRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = LintRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
