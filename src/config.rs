//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ptree/ptree.toml`
//! 3. Local config: an explicit file passed to [`Settings::load`]
//! 4. Environment variables: `PTREE_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

/// How trees are rendered by [`TreeDisplay`](crate::display::TreeDisplay).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Label shown for the root, whose key is the default value
    pub root_label: String,
    /// Append ` = value` to nodes holding a value
    pub show_values: bool,
    /// Deepest level rendered (root is level 0), None for unlimited
    pub max_depth: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            root_label: ".".into(),
            show_values: true,
            max_depth: None,
        }
    }
}

/// Raw display config for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub root_label: Option<String>,
    pub show_values: Option<bool>,
    pub max_depth: Option<usize>,
}

impl DisplayConfig {
    /// Overlay wins if Some, otherwise keep base.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            show_values: overlay.show_values.unwrap_or(self.show_values),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub log_filter: Option<String>,
    pub display: RawDisplayConfig,
}

/// Unified configuration for ptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fallback `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub display: DisplayConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            display: DisplayConfig::default(),
        }
    }
}

/// Get the XDG config directory for ptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ptree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ConfigResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            log_filter: overlay
                .log_filter
                .clone()
                .unwrap_or_else(|| self.log_filter.clone()),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// A missing global file is skipped; a missing `local` file is an error,
    /// since the caller asked for it explicitly.
    pub fn load(local: Option<&Path>) -> ConfigResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = local {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("PTREE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Apply env vars as explicit overrides (replace, not merge).
    fn apply_env_overrides(mut settings: Self, source: Environment) -> ConfigResult<Self> {
        let config = Config::builder().add_source(source).build()?;

        if let Ok(val) = config.get_string("log_filter") {
            settings.log_filter = val;
        }
        if let Ok(val) = config.get_string("display.root_label") {
            settings.display.root_label = val;
        }
        if let Ok(val) = config.get_bool("display.show_values") {
            settings.display.show_values = val;
        }
        if let Ok(val) = config.get::<usize>("display.max_depth") {
            settings.display.max_depth = Some(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Load(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# ptree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/ptree/ptree.toml
#   Local:  file passed to Settings::load
#   Env:    PTREE_* environment variables, e.g. PTREE_DISPLAY__ROOT_LABEL

# Fallback tracing filter when RUST_LOG is unset
# log_filter = "warn"

[display]
# Label printed for the root node
# root_label = "."

# Print values next to their keys
# show_values = true

# Deepest level to render (root is 0)
# max_depth = 3
"#
        .to_string()
    }
}
