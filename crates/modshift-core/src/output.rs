//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same corpus -> same output (files in path order,
//!    namespaces in name order)
//! 3. **Versioned:** Schema version in response enables forward compatibility

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::corpus::slash_path;
use crate::error::{MigrateError, OutputErrorCode};
use crate::index::NamespaceIndex;
use crate::migrate::MigrationPlan;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Migration Responses
// ============================================================================

/// Per-file entry of a migration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// Source file, relative to the corpus root.
    pub source: String,
    /// Output file, relative to the corpus root.
    pub output: String,
    /// Number of rewritten lines.
    pub edits: usize,
    /// Whether the output file was written.
    pub written: bool,
}

/// Response for the `run` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Corpus root directory.
    pub root: String,
    /// Number of distinct namespaces indexed.
    pub namespace_count: usize,
    /// True when nothing was written.
    pub dry_run: bool,
    /// Every corpus file, in path order.
    pub files: Vec<FileSummary>,
}

impl MigrateResponse {
    /// Summarize a plan. `written` says whether [`MigrationPlan::apply`] ran.
    pub fn from_plan(plan: &MigrationPlan, written: bool) -> Self {
        let target_extension = &plan.config().target_extension;
        let files = plan
            .rewrites()
            .iter()
            .map(|r| FileSummary {
                source: r.source.display(),
                output: slash_path(&r.source.relative_output_path(target_extension)),
                edits: r.edits.len(),
                written,
            })
            .collect();

        MigrateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            root: slash_path(plan.root()),
            namespace_count: plan.index().len(),
            dry_run: !written,
            files,
        }
    }

    /// Human-readable summary: one line per changed file, then a total.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let verb = if self.dry_run { "would write" } else { "wrote" };
        let mut changed = 0;
        let mut edits = 0;
        for file in &self.files {
            edits += file.edits;
            if file.edits > 0 {
                changed += 1;
                text.push_str(&format!(
                    "{} -> {} ({} lines)\n",
                    file.source, file.output, file.edits
                ));
            }
        }
        text.push_str(&format!(
            "{} {} files under {} ({} changed, {} lines rewritten, {} namespaces)\n",
            verb,
            self.files.len(),
            self.root,
            changed,
            edits,
            self.namespace_count
        ));
        text
    }
}

/// Response for the `index` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Corpus root directory.
    pub root: String,
    /// Namespace -> declaring module path (corpus-relative, no extension).
    pub namespaces: BTreeMap<String, String>,
}

impl IndexResponse {
    pub fn new(root: &std::path::Path, index: &NamespaceIndex) -> Self {
        IndexResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            root: slash_path(root),
            namespaces: index.to_display_map(),
        }
    }
}

// ============================================================================
// Error Responses
// ============================================================================

/// Error information for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a MigrateError.
    pub fn from_error(err: &MigrateError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let details = match err {
            MigrateError::UnresolvedNamespace {
                namespace,
                file,
                line,
            } => Some(serde_json::json!({
                "namespace": namespace,
                "file": file,
                "line": line
            })),
            MigrateError::ReadFailed { path, .. } | MigrateError::WriteFailed { path, .. } => {
                Some(serde_json::json!({ "path": slash_path(path) }))
            }
            MigrateError::CorpusNotFound { path } => Some(serde_json::json!({ "path": path })),
            MigrateError::InvalidConfig { path, .. } => {
                Some(serde_json::json!({ "config": path }))
            }
            _ => None,
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a MigrateError.
    pub fn from_error(err: &MigrateError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Response Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
