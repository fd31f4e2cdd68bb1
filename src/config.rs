//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `FAMTREE_*` prefix, `__` between nesting levels
//!    (e.g. `FAMTREE_LAYOUT__NODE_WIDTH=150`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::checked_depth;
use crate::layout::LayoutMetrics;

/// How much of a tree is shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Deepest generation shown below the root, unlimited when unset
    pub max_depth: Option<i64>,
}

/// Raw layout section for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub node_width: Option<f64>,
    pub node_height: Option<f64>,
    pub lateral_spacing: Option<f64>,
    pub level_height: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub layout: RawLayoutSettings,
    pub display: DisplaySettings,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Box and spacing sizes for the layout engine
    pub layout: LayoutMetrics,
    pub display: DisplaySettings,
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
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
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let base = &self.layout;
        let raw = &overlay.layout;
        Self {
            layout: LayoutMetrics {
                node_width: raw.node_width.unwrap_or(base.node_width),
                node_height: raw.node_height.unwrap_or(base.node_height),
                lateral_spacing: raw.lateral_spacing.unwrap_or(base.lateral_spacing),
                level_height: raw.level_height.unwrap_or(base.level_height),
            },
            display: DisplaySettings {
                max_depth: overlay.display.max_depth.or(self.display.max_depth),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), config_file)
    }

    /// Same as [`load`](Self::load) with the global file location given
    /// explicitly. A missing global file is skipped.
    pub fn load_from(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_file {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAMTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_float("layout.node_width"))? {
            settings.layout.node_width = val;
        }
        if let Some(val) = env_value(config.get_float("layout.node_height"))? {
            settings.layout.node_height = val;
        }
        if let Some(val) = env_value(config.get_float("layout.lateral_spacing"))? {
            settings.layout.lateral_spacing = val;
        }
        if let Some(val) = env_value(config.get_float("layout.level_height"))? {
            settings.layout.level_height = val;
        }
        if let Some(val) = env_value(config.get_int("display.max_depth"))? {
            settings.display.max_depth = Some(val);
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.layout.validate()?;
        self.max_depth()?;
        Ok(())
    }

    /// Configured depth limit, validated.
    pub fn max_depth(&self) -> Result<Option<usize>, ApplicationError> {
        Ok(self.display.max_depth.map(checked_depth).transpose()?)
    }

    /// Render as TOML for `famtree config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

/// Absent key → `None`; a value that does not parse is an error.
fn env_value<V>(lookup: Result<V, ConfigError>) -> Result<Option<V>, ApplicationError> {
    match lookup {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
