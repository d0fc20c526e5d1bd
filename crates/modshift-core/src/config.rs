//! Configuration handling for modshift.
//!
//! Every setting has a default, so running without a configuration file
//! migrates `core/**/*.js` into sibling `.ts` files. A `modshift.toml` in the
//! working directory (or an explicit `--config` file) may override them:
//!
//! ```toml
//! [modshift]
//! root = "core"
//! source_extension = "js"
//! target_extension = "ts"
//! exclude = ["**/externs/**"]
//! declaration = "module"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MigrateError, MigrateResult};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "modshift.toml";

/// Top-level layout of `modshift.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Migration settings
    #[serde(default)]
    pub modshift: MigrateConfig,
}

/// Which statement declares a file's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationStyle {
    /// `goog.module('ns');`
    #[default]
    Module,
    /// `goog.declareModuleId('ns');`
    DeclareModuleId,
}

/// Migration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Corpus root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extension of the files to migrate (no leading dot)
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Extension of the files written next to them (no leading dot)
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    /// Glob patterns (relative to the root) of files to leave out of the corpus
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Namespace declaration form
    #[serde(default)]
    pub declaration: DeclarationStyle,
}

fn default_root() -> PathBuf {
    PathBuf::from("core")
}

fn default_source_extension() -> String {
    "js".to_string()
}

fn default_target_extension() -> String {
    "ts".to_string()
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            source_extension: default_source_extension(),
            target_extension: default_target_extension(),
            exclude: Vec::new(),
            declaration: DeclarationStyle::default(),
        }
    }
}

impl MigrateConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> MigrateResult<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| {
            MigrateError::invalid_config(&display, format!("failed to read config file: {}", e))
        })?;
        Self::parse(&content, &display)
    }

    /// Parse configuration from TOML text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> MigrateResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            MigrateError::invalid_config(origin, format!("failed to parse config file: {}", e))
        })?;
        file.modshift.validate(origin)?;
        Ok(file.modshift)
    }

    /// Load `modshift.toml` from `dir` if it exists, defaults otherwise.
    pub fn load_from_dir(dir: &Path) -> MigrateResult<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            Self::load(&config_path)
        } else {
            Ok(MigrateConfig::default())
        }
    }

    /// Override the corpus root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Self {
        self.exclude.push(pattern.to_string());
        self
    }

    /// Check values that would make the run destructive or meaningless.
    pub fn validate(&self, origin: &str) -> MigrateResult<()> {
        for (key, ext) in [
            ("source_extension", &self.source_extension),
            ("target_extension", &self.target_extension),
        ] {
            if ext.is_empty() {
                return Err(MigrateError::invalid_config(
                    origin,
                    format!("{} must not be empty", key),
                ));
            }
            if ext.starts_with('.') {
                return Err(MigrateError::invalid_config(
                    origin,
                    format!("{} '{}' must not start with '.'", key, ext),
                ));
            }
        }
        // Same extension would overwrite the originals in place.
        if self.source_extension == self.target_extension {
            return Err(MigrateError::invalid_config(
                origin,
                format!(
                    "source_extension and target_extension are both '{}'",
                    self.source_extension
                ),
            ));
        }
        Ok(())
    }
}
