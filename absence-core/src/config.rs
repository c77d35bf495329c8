use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSansMono.ttf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Renderer settings. Usually read from a TOML file:
///
/// ```toml
/// show_all_group_objects = true
/// modify_all_group_absences = false
/// font_path = "assets/fonts/DejaVuSansMono.ttf"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Show every object of the active group, not just the viewer's own.
    pub show_all_group_objects: bool,
    /// Let any group member edit any absence of the group.
    pub modify_all_group_absences: bool,
    pub font_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_all_group_objects: true,
            modify_all_group_absences: false,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a config file. A relative `font_path` is resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let txt = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_toml_str(&txt)?;
        if cfg.font_path.is_relative()
            && let Some(dir) = path.parent()
        {
            cfg.font_path = dir.join(&cfg.font_path);
        }
        Ok(cfg)
    }
}
