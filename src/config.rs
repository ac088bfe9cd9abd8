//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gradebook/gradebook.toml`
//! 3. Environment variables: `GRADEBOOK_*` prefix
//! 4. Command line flags (`--data`), applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "gradebook.json";

/// Default indentation for `export`.
pub const DEFAULT_EXPORT_INDENT: usize = 2;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub export_indent: Option<usize>,
}

/// Unified configuration for gradebook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding the gradebook (default: ./gradebook.json)
    pub data_file: PathBuf,
    /// Indentation used by `export` when no `--indent` is given
    pub export_indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            export_indent: DEFAULT_EXPORT_INDENT,
        }
    }
}

/// Get the XDG config directory for gradebook.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gradebook").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gradebook.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence, using the XDG global config file.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with an explicit global config file.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. `global_path`, if it exists
    /// 3. Environment variables: `GRADEBOOK_*` prefix
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Replace the data file (from `--data`).
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
            self.expand_paths();
        }
        self
    }

    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            export_indent: overlay.export_indent.unwrap_or(self.export_indent),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    /// Apply GRADEBOOK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GRADEBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        match config.get_int("export_indent") {
            Ok(val) => {
                settings.export_indent =
                    usize::try_from(val).map_err(|_| ApplicationError::Config {
                        message: format!("export_indent must not be negative, got {}", val),
                    })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gradebook configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gradebook/gradebook.toml
#   Env:    GRADEBOOK_* environment variables (e.g. GRADEBOOK_DATA_FILE)
#   CLI:    --data <path>

# JSON file holding students, subjects and grades
# data_file = "~/gradebook.json"

# Indentation used by `gradebook export`
# export_indent = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
