//! Documentation Index
//!
//! Static label-to-file lookup for per-disease documentation. Built once at
//! startup by scanning the operator-curated docs directory for `*.md` files;
//! the file stem is the disease keyword.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::AdvisorError;

/// Disease-label keyword -> documentation file path. Read-only after build.
#[derive(Debug, Default)]
pub struct DocumentationIndex {
    entries: FxHashMap<String, PathBuf>,
}

impl DocumentationIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan `dir` for `*.md` files. A missing or unreadable directory yields
    /// an empty index (documentation then degrades to "no info available").
    pub fn from_dir(dir: &Path) -> Self {
        let mut entries = FxHashMap::default();

        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                tracing::warn!("docs directory unavailable ({}): {}", dir.display(), e);
                return Self::empty();
            }
        };

        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.insert(stem.to_string(), path.clone());
            }
        }

        tracing::info!("documentation index: {} entries", entries.len());
        Self { entries }
    }

    /// Register a keyword explicitly (tests, hand-curated mappings)
    pub fn insert(&mut self, keyword: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(keyword.into(), path.into());
    }

    /// Resolve a predicted label to a documentation path.
    ///
    /// Exact keyword match wins; otherwise any keyword contained in the label
    /// matches, longest keyword first (most specific).
    pub fn resolve(&self, label: &str) -> Option<&Path> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        if let Some(path) = self.entries.get(label) {
            return Some(path);
        }

        let mut best: Option<(&String, &PathBuf)> = None;
        for (keyword, path) in &self.entries {
            if !label.contains(keyword.as_str()) {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, _)) => {
                    keyword.len() > current.len()
                        || (keyword.len() == current.len() && keyword < current)
                }
            };
            if better {
                best = Some((keyword, path));
            }
        }
        best.map(|(_, path)| path.as_path())
    }

    /// Read and render the documentation for `label` to HTML
    pub fn fetch_html(&self, label: &str) -> Result<String, AdvisorError> {
        let path = self
            .resolve(label)
            .ok_or_else(|| AdvisorError::DocumentationUnavailable(label.to_string()))?;
        let source = std::fs::read_to_string(path)
            .map_err(|_| AdvisorError::DocumentationUnavailable(label.to_string()))?;
        Ok(super::render(&source))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
