//! Error types for zbg.
//!
//! [`ZbgError`] is what every command returns. Precondition failures are
//! detected before anything is written and are meant to be shown to the user
//! as-is; see [`ZbgError::is_precondition`].

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::registry::RegistryError;

/// Errors that can occur while listing or registering backgrounds.
#[derive(Debug, Error)]
pub enum ZbgError {
    /// The source directory does not exist.
    #[error("Directory `{}` could not be found!", .0.display())]
    DirectoryNotFound(PathBuf),
    /// The source path exists but is not a directory.
    #[error(
        "File `{}` is not a directory, which is required to configure the timed background!",
        .0.display()
    )]
    NotADirectory(PathBuf),
    /// No numbered JPG or PNG file was found.
    #[error("No JPG or PNG files were found in {}", .0.display())]
    NoMatchingImages(PathBuf),
    /// No name was given and none could be derived from the directory argument.
    #[error("Cannot derive a background name from `{0}`, pass one with --name")]
    UnnamedBackground(String),
    /// The process may not write to a location the registration needs.
    #[error("Write access to `{}` is required: {source}", .path.display())]
    PrivilegeRequired {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading or interpreting a wallpaper registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Copying images or writing a document failed mid-installation.
    #[error("Failed to install `{}`: {source}", .path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON output could not be produced.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZbgError {
    /// Whether the error was raised before any file was touched.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound(_)
                | Self::NotADirectory(_)
                | Self::NoMatchingImages(_)
                | Self::UnnamedBackground(_)
                | Self::PrivilegeRequired { .. }
                | Self::Registry(_)
                | Self::Config(_)
        )
    }

    /// Whether re-running with elevated privileges could fix the error.
    #[must_use]
    pub const fn needs_elevation(&self) -> bool { matches!(self, Self::PrivilegeRequired { .. }) }
}
