//! Migration driver: index, rewrite, write.
//!
//! A run has three steps, strictly in order:
//!
//! 1. discover the corpus and build the [`NamespaceIndex`] from every file;
//! 2. rewrite every file in memory against the finished index;
//! 3. write each rewritten file next to its source.
//!
//! Steps 1 and 2 form a [`MigrationPlan`]. Because every namespace is resolved
//! during planning, an unresolved reference or unreadable file stops the run
//! before any output file is written. A write failure in step 3 stops at that
//! file; outputs already written are left in place.

use std::path::Path;

use crate::config::MigrateConfig;
use crate::corpus::Corpus;
use crate::error::MigrateResult;
use crate::index::NamespaceIndex;
use crate::rewrite::{FileRewrite, Rewriter};

/// The outcome of planning a migration: everything except the writes.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    config: MigrateConfig,
    corpus: Corpus,
    index: NamespaceIndex,
    rewrites: Vec<FileRewrite>,
}

/// Discover the corpus and build its namespace index.
pub fn build_index(config: &MigrateConfig) -> MigrateResult<(Corpus, NamespaceIndex)> {
    config.validate("configuration")?;
    let corpus = Corpus::discover(config)?;
    let index = NamespaceIndex::build(&corpus, config.declaration)?;
    Ok((corpus, index))
}

/// Index the corpus and rewrite every file in memory.
pub fn plan(config: &MigrateConfig) -> MigrateResult<MigrationPlan> {
    let (corpus, index) = build_index(config)?;

    let rewriter = Rewriter::new(&index, config.declaration);
    let rewrites = corpus
        .files()
        .iter()
        .map(|file| rewriter.rewrite_file(file, &config.target_extension))
        .collect::<MigrateResult<Vec<_>>>()?;

    let changed = rewrites.iter().filter(|r| !r.is_verbatim()).count();
    tracing::info!(
        "Planned {} files under {} ({} with changes)",
        rewrites.len(),
        corpus.root().display(),
        changed
    );

    Ok(MigrationPlan {
        config: config.clone(),
        corpus,
        index,
        rewrites,
    })
}

/// Plan and apply a migration.
pub fn run(config: &MigrateConfig) -> MigrateResult<MigrationPlan> {
    let plan = plan(config)?;
    plan.apply()?;
    Ok(plan)
}

impl MigrationPlan {
    /// Write every output file. Returns the number of files written.
    pub fn apply(&self) -> MigrateResult<usize> {
        for rewrite in &self.rewrites {
            rewrite.write()?;
        }
        tracing::info!("Wrote {} files", self.rewrites.len());
        Ok(self.rewrites.len())
    }

    pub fn config(&self) -> &MigrateConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        self.corpus.root()
    }

    pub fn index(&self) -> &NamespaceIndex {
        &self.index
    }

    /// Rewrites in corpus order.
    pub fn rewrites(&self) -> &[FileRewrite] {
        &self.rewrites
    }

    /// Number of files with at least one rewritten line.
    pub fn changed_files(&self) -> usize {
        self.rewrites.iter().filter(|r| !r.is_verbatim()).count()
    }

    /// Total rewritten lines across the corpus.
    pub fn total_edits(&self) -> usize {
        self.rewrites.iter().map(|r| r.edits.len()).sum()
    }
}
