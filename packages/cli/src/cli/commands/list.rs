//! `zbg list`: prints the wallpapers known to both registries.

use serde::Serialize;

use crate::cli::output;
use crate::config::ZbgConfig;
use crate::error::ZbgError;
use crate::registry::{WallpaperEntry, parse_registry, validate};

/// JSON shape printed by `zbg list --json`.
#[derive(Debug, Serialize)]
pub struct ListOutput<'a> {
    /// Wallpapers shipped with the system.
    pub default: &'a [WallpaperEntry],
    /// Wallpapers added afterwards, including timed backgrounds.
    pub other: &'a [WallpaperEntry],
}

/// Execute the list command.
///
/// The JSON output carries every field verbatim. The colored output needs
/// the display fields of every entry and fails on the first incomplete one.
///
/// # Errors
///
/// Returns an error if a registry cannot be read or parsed.
pub fn execute(json: bool, config: &ZbgConfig) -> Result<(), ZbgError> {
    let default = parse_registry(&config.default_wallpapers())?;
    let other = parse_registry(&config.other_wallpapers())?;

    if json {
        let rendered = serde_json::to_string_pretty(&ListOutput { default: &default, other: &other })?;
        println!("{rendered}");
        return Ok(());
    }

    let default = validate(&default)?;
    let other = validate(&other)?;

    output::print_wallpapers("Default wallpapers:", &default);
    println!();
    output::print_wallpapers("Other wallpapers:", &other);

    Ok(())
}
