//! Source file collection
//!
//! Recursively enumerates the files below a root directory whose name ends
//! with a given suffix. Entries are sorted by file name at every level so
//! repeated runs see the same order.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Source root does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },
    #[error("Source root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    #[error("Failed to traverse '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// Lazily yields matching source files; each file is read when pulled.
pub struct SourceCollector {
    root: PathBuf,
    suffix: String,
    entries: walkdir::IntoIter,
}

impl std::fmt::Debug for SourceCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCollector")
            .field("root", &self.root)
            .field("suffix", &self.suffix)
            .finish_non_exhaustive()
    }
}

impl SourceCollector {
    pub fn new(root: &Path, suffix: &str) -> Result<Self, CollectionError> {
        if !root.exists() {
            return Err(CollectionError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(CollectionError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            suffix: suffix.to_string(),
            entries: WalkDir::new(root).sort_by_file_name().into_iter(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn matches(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(&self.suffix))
                .unwrap_or(false)
    }
}

impl Iterator for SourceCollector {
    type Item = Result<SourceFile, CollectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(CollectionError::Walk { path, source: e }));
                }
            };

            if !self.matches(&entry) {
                continue;
            }

            return Some(read_source(entry.into_path()));
        }
    }
}

fn read_source(path: PathBuf) -> Result<SourceFile, CollectionError> {
    match fs::read(&path) {
        Ok(bytes) => Ok(SourceFile {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            path,
        }),
        Err(e) => Err(CollectionError::Read { path, source: e }),
    }
}

/// Eagerly collects every matching file below `root`.
pub fn collect_sources(root: &Path, suffix: &str) -> Result<Vec<SourceFile>, CollectionError> {
    SourceCollector::new(root, suffix)?.collect()
}
