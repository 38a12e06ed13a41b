//! Configuration types for zbg.
//!
//! The configuration file is optional and supports JSONC format (JSON with
//! comments). Every field falls back to the Zorin OS 16 layout, so an empty
//! file and no file at all behave the same.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::background::CycleDuration;
use crate::platform::path::expand;

/// Default directory receiving one subdirectory per background.
pub const DEFAULT_BACKGROUNDS_DIR: &str = "/usr/share/backgrounds";
/// Default registry holding the wallpapers shipped with the system.
pub const DEFAULT_DEFAULT_WALLPAPERS: &str =
    "/usr/share/gnome-background-properties/zorin-default-wallpapers.xml";
/// Default registry that receives registered timed backgrounds.
pub const DEFAULT_OTHER_WALLPAPERS: &str =
    "/usr/share/gnome-background-properties/zorin-os-16-wallpapers.xml";

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in the home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".zbg.jsonc", ".zbg.json"];

/// Default cycle used by `register` when no duration flag is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CycleConfig {
    /// Hours for a full cycle through all images.
    pub hours: u64,
    /// Minutes added to `hours`.
    pub minutes: u64,
    /// Seconds added to `hours` and `minutes`.
    pub seconds: u64,
}

impl Default for CycleConfig {
    fn default() -> Self { Self { hours: 24, minutes: 0, seconds: 0 } }
}

impl From<CycleConfig> for CycleDuration {
    fn from(cycle: CycleConfig) -> Self { Self::new(cycle.hours, cycle.minutes, cycle.seconds) }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ZbgConfig {
    /// Directory where background image folders and timed documents are
    /// installed. Supports `~`.
    pub backgrounds_dir: String,

    /// Registry of the wallpapers shipped with the system. Only read.
    pub default_wallpapers: String,

    /// Registry that registered timed backgrounds are written to.
    pub other_wallpapers: String,

    /// Default cycle duration for `zbg register`.
    pub cycle: CycleConfig,
}

impl Default for ZbgConfig {
    fn default() -> Self {
        Self {
            backgrounds_dir: DEFAULT_BACKGROUNDS_DIR.to_string(),
            default_wallpapers: DEFAULT_DEFAULT_WALLPAPERS.to_string(),
            other_wallpapers: DEFAULT_OTHER_WALLPAPERS.to_string(),
            cycle: CycleConfig::default(),
        }
    }
}

impl ZbgConfig {
    /// Expanded backgrounds directory.
    #[must_use]
    pub fn backgrounds_dir(&self) -> PathBuf { expand(&self.backgrounds_dir) }

    /// Expanded path of the system wallpaper registry.
    #[must_use]
    pub fn default_wallpapers(&self) -> PathBuf { expand(&self.default_wallpapers) }

    /// Expanded path of the registry receiving timed backgrounds.
    #[must_use]
    pub fn other_wallpapers(&self) -> PathBuf { expand(&self.other_wallpapers) }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/zbg/config.jsonc` if the variable is set
/// 2. `~/.config/zbg/config.jsonc`
/// 3. the platform config directory (`dirs::config_dir()`)
/// 4. `~/.zbg.jsonc` (legacy/simple location)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let zbg_dir = PathBuf::from(xdg_config).join("zbg");
        for filename in CONFIG_FILE_NAMES {
            paths.push(zbg_dir.join(filename));
        }
    }

    let mut push_unique = |path: PathBuf| {
        if !paths.contains(&path) {
            paths.push(path);
        }
    };

    if let Some(home) = dirs::home_dir() {
        let zbg_dir = home.join(".config").join("zbg");
        for filename in CONFIG_FILE_NAMES {
            push_unique(zbg_dir.join(filename));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let zbg_dir = config_dir.join("zbg");
        for filename in CONFIG_FILE_NAMES {
            push_unique(zbg_dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            push_unique(home.join(filename));
        }
    }

    paths
}

/// Loads and parses a single JSONC configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, `ConfigError::Io`
/// if it cannot be read, and `ConfigError::Parse` if it is not valid JSON.
pub fn load_config_from_path(path: &Path) -> Result<ZbgConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let file = fs::File::open(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let reader = json_comments::StripComments::new(file);

    serde_json::from_reader(reader)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// Loads the configuration from the first existing file in `candidates`.
///
/// Returns the defaults and `None` when none of them exists.
///
/// # Errors
///
/// Returns an error if the first existing file cannot be read or parsed.
pub fn load_first(candidates: &[PathBuf]) -> Result<(ZbgConfig, Option<PathBuf>), ConfigError> {
    for path in candidates {
        if path.exists() {
            let config = load_config_from_path(path)?;
            return Ok((config, Some(path.clone())));
        }
    }

    Ok((ZbgConfig::default(), None))
}
