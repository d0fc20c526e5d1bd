//! modshift - migrate `goog.module` sources to ES modules.
//!
//! This crate provides the CLI binary for modshift. The engine lives in
//! `modshift-core`.
//!
//! ## Modules
//!
//! - `cli` - CLI command implementations

pub mod cli;

// Re-export core types for convenience
pub use modshift_core::config::{DeclarationStyle, MigrateConfig, CONFIG_FILE_NAME};
pub use modshift_core::error::{MigrateError, OutputErrorCode};
pub use modshift_core::output::{
    ErrorInfo, ErrorResponse, IndexResponse, MigrateResponse, SCHEMA_VERSION,
};
