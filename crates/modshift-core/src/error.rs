//! Error types and error code constants for modshift.
//!
//! `MigrateError` is the single error type for the engine and the CLI. Every
//! failure is fatal: the run stops at the first error and nothing is retried.
//!
//! ## Error Code Mapping
//!
//! Exit codes:
//! - `2`: Invalid arguments or configuration
//! - `3`: Resolution errors (corpus missing, namespace not declared anywhere)
//! - `4`: Apply errors (failed to write an output file)
//! - `10`: Internal errors (read failures, directory walk failures, bugs)

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or configuration from caller.
    InvalidArguments = 2,
    /// Resolution errors (missing corpus, unresolved namespace).
    ResolutionError = 3,
    /// Apply errors (failed to write output files).
    ApplyError = 4,
    /// Internal errors (read failures, bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the migration engine.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("invalid configuration {path}: {message}")]
    InvalidConfig { path: String, message: String },

    /// The corpus root does not exist or is not a directory.
    #[error("corpus root not found: {path}")]
    CorpusNotFound { path: String },

    /// A require statement names a namespace that no file declares.
    #[error("unresolved namespace '{namespace}' at {file}:{line}")]
    UnresolvedNamespace {
        namespace: String,
        file: String,
        line: u32,
    },

    /// A corpus file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Result type for migration operations.
pub type MigrateResult<T> = Result<T, MigrateError>;

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&MigrateError> for OutputErrorCode {
    fn from(err: &MigrateError) -> Self {
        match err {
            MigrateError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            MigrateError::InvalidConfig { .. } => OutputErrorCode::InvalidArguments,
            MigrateError::CorpusNotFound { .. } => OutputErrorCode::ResolutionError,
            MigrateError::UnresolvedNamespace { .. } => OutputErrorCode::ResolutionError,
            MigrateError::ReadFailed { .. } => OutputErrorCode::InternalError,
            MigrateError::WriteFailed { .. } => OutputErrorCode::ApplyError,
            MigrateError::Walk(_) => OutputErrorCode::InternalError,
            MigrateError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<MigrateError> for OutputErrorCode {
    fn from(err: MigrateError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl MigrateError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        MigrateError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(path: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        MigrateError::Internal {
            message: message.into(),
        }
    }

    /// Create a read failure for `path`.
    pub fn read_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MigrateError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a write failure for `path`.
    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MigrateError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
