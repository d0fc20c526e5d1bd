//! CLI command implementations.
//!
//! Helpers behind the `modshift` binary:
//! - `run` - index the corpus, rewrite every file, write the outputs
//! - `index` - print the namespace index
//!
//! All functions return `Result<_, MigrateError>`; the caller renders errors as
//! JSON and maps them to exit codes.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use modshift_core::config::MigrateConfig;
use modshift_core::diff::generate_unified_diff;
use modshift_core::error::MigrateError;
use modshift_core::migrate::{build_index, plan};
use modshift_core::output::{emit_response, IndexResponse, MigrateResponse};

/// Output format for the `run` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary (default).
    #[default]
    Text,
    /// Full JSON response.
    Json,
    /// Unified diff of every rewritten line.
    Diff,
}

/// Assemble the effective configuration.
///
/// Precedence: command-line overrides, then the configuration file (`config`
/// if given, otherwise `modshift.toml` in `cwd` when present), then defaults.
pub fn resolve_config(
    cwd: &Path,
    config: Option<&Path>,
    root: Option<PathBuf>,
) -> Result<MigrateConfig, MigrateError> {
    let mut resolved = match config {
        Some(path) => {
            if !path.is_file() {
                return Err(MigrateError::invalid_args(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            MigrateConfig::load(path)?
        }
        None => MigrateConfig::load_from_dir(cwd)?,
    };

    if let Some(root) = root {
        resolved = resolved.with_root(root);
    }

    // A relative root is taken from the working directory.
    if resolved.root.is_relative() {
        let joined = cwd.join(&resolved.root);
        resolved = resolved.with_root(joined);
    }

    Ok(resolved)
}

/// Migrate the corpus, or only plan it when `dry_run` is set, and report.
pub fn run_migrate(
    config: &MigrateConfig,
    dry_run: bool,
    format: ReportFormat,
    out: &mut impl Write,
) -> Result<(), MigrateError> {
    let plan = plan(config)?;
    if !dry_run {
        plan.apply()?;
    }

    let response = MigrateResponse::from_plan(&plan, !dry_run);
    let rendered = match format {
        ReportFormat::Text => out.write_all(response.to_text().as_bytes()),
        ReportFormat::Json => emit_response(&response, out),
        ReportFormat::Diff => out.write_all(
            generate_unified_diff(plan.rewrites(), &config.target_extension).as_bytes(),
        ),
    };
    rendered.map_err(|e| MigrateError::internal(format!("failed to write report: {}", e)))
}

/// Build the namespace index and print it as JSON.
pub fn run_index(config: &MigrateConfig, out: &mut impl Write) -> Result<(), MigrateError> {
    let (corpus, index) = build_index(config)?;
    let response = IndexResponse::new(corpus.root(), &index);
    emit_response(&response, out)
        .map_err(|e| MigrateError::internal(format!("failed to write report: {}", e)))
}
