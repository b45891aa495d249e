//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltree/avltree.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `AVLTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How a tree is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Grid with `/` and `\` connectors
    #[default]
    Grid,
    /// Indented outline
    Outline,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub row_prefix: Option<String>,
    pub rule_width: Option<usize>,
    pub preload: Option<Vec<i64>>,
    pub style: Option<RenderStyle>,
}

/// Unified configuration for avltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Written before every rendered row (default: one space)
    pub row_prefix: String,
    /// Width of the dashed rule above the menu
    pub rule_width: usize,
    /// Values inserted before the first prompt
    pub preload: Vec<i64>,
    /// Drawing style for printed trees
    pub style: RenderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            row_prefix: " ".into(),
            rule_width: 40,
            preload: vec![],
            style: RenderStyle::Grid,
        }
    }
}

/// Get the XDG config directory for avltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avltree.toml"))
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
        Self {
            row_prefix: overlay
                .row_prefix
                .clone()
                .unwrap_or_else(|| self.row_prefix.clone()),
            rule_width: overlay.rule_width.unwrap_or(self.rule_width),
            preload: overlay
                .preload
                .clone()
                .unwrap_or_else(|| self.preload.clone()),
            style: overlay.style.unwrap_or(self.style),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file given on the command line; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/avltree/avltree.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `AVLTREE_*` prefix
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&Self::read_explicit(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Defaults overlaid with a single TOML file; no global config, no env vars.
    pub fn from_toml_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&Self::read_explicit(path)?))
    }

    fn read_explicit(path: &Path) -> Result<RawSettings, ApplicationError> {
        if !path.exists() {
            return Err(ApplicationError::ConfigNotFound(path.to_path_buf()));
        }
        debug!("loading config {}", path.display());
        load_raw_settings(path)
    }

    /// Apply AVLTREE_* environment variables as explicit overrides.
    ///
    /// Unset variables leave the field alone; a set variable that does not
    /// convert is a config error.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("AVLTREE")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("preload"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "row_prefix")? {
            settings.row_prefix = val;
        }
        if let Some(val) = env_value(&config, "rule_width")? {
            settings.rule_width = val;
        }
        // a single number parses as an integer, not a list
        let preload = match config.get::<i64>("preload") {
            Ok(single) => Some(vec![single]),
            Err(ConfigError::NotFound(_)) => None,
            Err(_) => env_value(&config, "preload")?,
        };
        if let Some(val) = preload {
            settings.preload = val;
        }
        if let Some(val) = env_value(&config, "style")? {
            settings.style = val;
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
        r#"# avltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/avltree/avltree.toml
#   Explicit: avltree --config <file>
#   Env:      AVLTREE_* environment variables (AVLTREE_PRELOAD=1,2,3)

# Written before every printed tree row
# row_prefix = " "

# Width of the dashed rule above the menu
# rule_width = 40

# Values inserted when the menu starts
# preload = [50, 30, 70]

# "grid" or "outline"
# style = "grid"
"#
        .to_string()
    }
}

fn env_value<'de, T: Deserialize<'de>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("AVLTREE_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_matches_classic_menu() {
        let settings = Settings::default();
        assert_eq!(settings.row_prefix, " ");
        assert_eq!(settings.rule_width, 40);
        assert!(settings.preload.is_empty());
        assert_eq!(settings.style, RenderStyle::Grid);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let overlay = RawSettings {
            rule_width: Some(10),
            style: Some(RenderStyle::Outline),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.rule_width, 10);
        assert_eq!(merged.style, RenderStyle::Outline);
        assert_eq!(merged.row_prefix, " ");
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_raw() {
        let settings = Settings {
            preload: vec![3, 1, 2],
            ..Default::default()
        };
        let raw: RawSettings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
