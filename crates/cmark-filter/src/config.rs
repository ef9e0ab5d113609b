//! Filter configuration.
//!
//! Parses `cmark-filter.toml` files with serde and discovers them in the
//! current directory or its parents:
//!
//! ```toml
//! smartypants_scope = "all"   # or "default-renderer"
//!
//! [options]
//! strikethrough = true
//! html = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::filter::MarkdownFilter;
use crate::flags::is_recognized;
use crate::options::OptionSet;
use crate::render::SmartypantsScope;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cmark-filter.toml";

/// Filter configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which renderers the `smartypants` option applies to.
    pub smartypants_scope: SmartypantsScope,
    /// Default rendering options.
    pub options: OptionSet,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `cmark-filter.toml` in the current directory and its parents, and
    /// falls back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on invalid TOML or unknown scope values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate();
        Ok(config)
    }

    /// Warn about option names that have no effect.
    ///
    /// Returns the unknown names. They stay in the option set and are ignored
    /// when rendering.
    pub fn validate(&self) -> Vec<&str> {
        let unknown: Vec<&str> = self
            .options
            .names()
            .filter(|name| !is_recognized(name))
            .collect();
        for name in &unknown {
            tracing::warn!(option = %name, "Unknown markdown option, ignoring");
        }
        unknown
    }

    /// Build a filter with these defaults.
    #[must_use]
    pub fn into_filter(self) -> MarkdownFilter {
        MarkdownFilter::new(self.options).with_smartypants_scope(self.smartypants_scope)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded filter configuration");
        Ok(config)
    }
}

impl MarkdownFilter {
    /// Build a filter from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.options.clone()).with_smartypants_scope(config.smartypants_scope)
    }
}
