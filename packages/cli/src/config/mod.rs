//! Configuration module for zbg.
//!
//! The configuration is loaded once by the binary and passed down by
//! reference; nothing here keeps global state.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod schema;
pub mod types;

use std::path::{Path, PathBuf};

pub use schema::{generate_schema, generate_schema_json};
pub use types::{
    ConfigError, CycleConfig, DEFAULT_BACKGROUNDS_DIR, DEFAULT_DEFAULT_WALLPAPERS,
    DEFAULT_OTHER_WALLPAPERS, ZbgConfig, config_paths, load_config_from_path, load_first,
};

/// Loads the configuration for this process.
///
/// A `custom` path (from `--config`) must exist. Otherwise the default search
/// paths are tried and the built-in defaults are used when none exists.
///
/// Returns the configuration and the file it came from, if any.
///
/// # Errors
///
/// Returns an error if the chosen file is missing, unreadable or invalid.
pub fn load(custom: Option<&Path>) -> Result<(ZbgConfig, Option<PathBuf>), ConfigError> {
    let (config, source) = match custom {
        Some(path) => (load_config_from_path(path)?, Some(path.to_path_buf())),
        None => load_first(&config_paths())?,
    };

    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
        None => tracing::debug!("no configuration file found, using defaults"),
    }

    Ok((config, source))
}
