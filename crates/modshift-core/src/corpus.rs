//! Corpus discovery.
//!
//! The corpus is every file under the root directory whose extension is the
//! configured source extension, minus configured exclusions. Files are sorted by
//! corpus-relative path so that runs are reproducible, including which file
//! wins when two declare the same namespace.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::MigrateConfig;
use crate::error::{MigrateError, MigrateResult};

// ============================================================================
// Source Files
// ============================================================================

/// A file in the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as found by the walk (root-prefixed).
    pub path: PathBuf,
    /// Path relative to the corpus root.
    pub relative: PathBuf,
}

impl SourceFile {
    /// Corpus-relative path with the final extension stripped.
    ///
    /// This is the value recorded in the namespace index.
    pub fn module_path(&self) -> PathBuf {
        self.relative.with_extension("")
    }

    /// Sibling path the rewritten contents are written to.
    pub fn output_path(&self, target_extension: &str) -> PathBuf {
        self.path.with_extension(target_extension)
    }

    /// Corpus-relative output path, for reporting.
    pub fn relative_output_path(&self, target_extension: &str) -> PathBuf {
        self.relative.with_extension(target_extension)
    }

    /// Read the whole file.
    pub fn read(&self) -> MigrateResult<String> {
        fs::read_to_string(&self.path).map_err(|e| MigrateError::read_failed(&self.path, e))
    }

    /// Corpus-relative path with `/` separators.
    pub fn display(&self) -> String {
        slash_path(&self.relative)
    }
}

/// Render a path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/")
}

// ============================================================================
// Corpus
// ============================================================================

/// The set of files a migration operates on.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl Corpus {
    /// Walk `config.root` and collect every source file.
    pub fn discover(config: &MigrateConfig) -> MigrateResult<Self> {
        let root = config.root.clone();
        if !root.is_dir() {
            return Err(MigrateError::CorpusNotFound {
                path: root.display().to_string(),
            });
        }

        let excludes = build_exclude_set(&config.exclude)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path
                .extension()
                .is_none_or(|ext| ext != config.source_extension.as_str())
            {
                continue;
            }

            let relative = match path.strip_prefix(&root) {
                Ok(p) => p.to_path_buf(),
                Err(_) => continue,
            };

            if excludes.is_match(&relative) {
                tracing::debug!("Excluding {} from corpus", relative.display());
                continue;
            }

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative,
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));

        Ok(Corpus { root, files })
    }

    /// Corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files in corpus-relative path order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn build_exclude_set(patterns: &[String]) -> MigrateResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            MigrateError::invalid_config("exclude", format!("invalid glob '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| MigrateError::invalid_config("exclude", e.to_string()))
}
