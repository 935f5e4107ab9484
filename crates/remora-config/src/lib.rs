//! Configuration management for Remora.
//!
//! Parses `remora.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. All sections are
//! optional; an absent file yields the defaults.
//!
//! ```toml
//! [refresh]
//! marker_class = "mermaid"
//! placeholder = "class_diagram_inheritance"
//! arrow = "<|--"
//!
//! [mermaid]
//! theme = "forest"
//! security_level = "loose"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "remora.toml";

/// Plugin configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Diagram refresh configuration.
    pub refresh: RefreshConfig,
    /// Options forwarded to the Mermaid engine at initialization.
    pub mermaid: MermaidConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Diagram refresh configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Class name marking elements that hold diagram source.
    pub marker_class: String,
    /// Token authors write where the arrow cannot be expressed.
    pub placeholder: String,
    /// Mermaid's native token the placeholder is rewritten to.
    pub arrow: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            marker_class: "mermaid".to_owned(),
            placeholder: "class_diagram_inheritance".to_owned(),
            arrow: "<|--".to_owned(),
        }
    }
}

/// Mermaid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct MermaidConfig {
    /// Mermaid theme name (e.g. `"forest"`). Engine default when unset.
    pub theme: Option<String>,
    /// Mermaid security level (e.g. `"loose"`). Engine default when unset.
    pub security_level: Option<String>,
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
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `remora.toml` in the current directory and parents and
    /// falls back to defaults when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, or if
    /// parsing or validation fails.
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
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.refresh.marker_class, "refresh.marker_class")?;

        // The marker class ends up inside a selector; restrict it to the
        // characters both class attributes and selectors agree on.
        let marker_ok = self
            .refresh
            .marker_class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !marker_ok {
            return Err(ConfigError::Validation(format!(
                "refresh.marker_class '{}' may only contain ASCII alphanumerics, '-' or '_'",
                self.refresh.marker_class
            )));
        }

        require_non_empty(&self.refresh.placeholder, "refresh.placeholder")?;
        require_non_empty(&self.refresh.arrow, "refresh.arrow")?;
        Ok(())
    }
}
