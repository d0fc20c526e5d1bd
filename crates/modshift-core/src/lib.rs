//! Core engine for modshift.
//!
//! Migrates a corpus of `goog.module` files to ES module syntax in two phases:
//! a namespace index is built from every file, then every file is rewritten
//! line by line against the finished index.
//!
//! - Corpus discovery and configuration
//! - Namespace index
//! - Line patterns and statement rewriting
//! - Relative import specifiers
//! - Error types and error codes
//! - JSON output types and unified diffs for CLI responses

pub mod config;
pub mod corpus;
pub mod diff;
pub mod error;
pub mod index;
pub mod migrate;
pub mod output;
pub mod patterns;
pub mod relpath;
pub mod rewrite;

pub use config::{DeclarationStyle, MigrateConfig};
pub use corpus::{Corpus, SourceFile};
pub use error::{MigrateError, MigrateResult, OutputErrorCode};
pub use index::NamespaceIndex;
pub use migrate::{build_index, plan, run, MigrationPlan};
pub use patterns::{LineKind, LineShape};
pub use rewrite::{FileRewrite, LineEdit, Rewriter};
