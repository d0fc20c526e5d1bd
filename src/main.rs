//! Binary entry point for the modshift CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Migrate core/**/*.js to sibling .ts files
//! modshift
//!
//! # Preview the rewrite as a unified diff without writing anything
//! modshift run --dry-run --format diff
//!
//! # Show which file declares which namespace
//! modshift index
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use modshift::cli::{resolve_config, run_index, run_migrate, ReportFormat};
use modshift_core::error::{MigrateError, OutputErrorCode};
use modshift_core::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Migrate goog.module sources to ES module imports and exports.
#[derive(Parser, Debug)]
#[command(
    name = "modshift",
    version,
    about = "Migrate goog.module sources to ES module imports and exports"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Corpus root directory (default: `core`, or `root` from modshift.toml).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file (default: modshift.toml in the current directory, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite every corpus file and write the outputs (default).
    Run {
        /// Plan the rewrite without writing any file.
        #[arg(long)]
        dry_run: bool,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// Print the namespace index as JSON.
    Index,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);

            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like every other response
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), MigrateError> {
    let cwd = std::env::current_dir()
        .map_err(|e| MigrateError::internal(format!("cannot read current directory: {}", e)))?;
    let config = resolve_config(&cwd, cli.global.config.as_deref(), cli.global.root)?;

    let mut stdout = io::stdout().lock();
    match cli.command.unwrap_or(Command::Run {
        dry_run: false,
        format: ReportFormat::default(),
    }) {
        Command::Run { dry_run, format } => run_migrate(&config, dry_run, format, &mut stdout)?,
        Command::Index => run_index(&config, &mut stdout)?,
    }
    let _ = stdout.flush();
    Ok(())
}
