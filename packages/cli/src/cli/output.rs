//! CLI output formatting utilities.
//!
//! Formatting returns strings so it can be tested; the `print_*` helpers only
//! write them out. Coloring follows the global `colored` override set at
//! startup, so `--no-color` and `NO_COLOR` are honored everywhere.

use std::fmt::Write as _;

use colored::Colorize;

use crate::registry::Wallpaper;

/// Formats a section heading.
#[must_use]
pub fn heading(text: &str) -> String { text.bright_cyan().to_string() }

/// Formats one wallpaper as an indented block followed by a blank line.
///
/// Timed backgrounds have their document path highlighted.
#[must_use]
pub fn format_wallpaper(wallpaper: &Wallpaper<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", format!("{}:", wallpaper.name).cyan());

    if wallpaper.is_timed() {
        let _ = writeln!(out, "    {}{}", "filename: ".dimmed(), wallpaper.filename.bright_blue().bold());
    } else {
        let _ = writeln!(out, "    {}", format!("filename: {}", wallpaper.filename).dimmed());
    }

    let details = format!(
        "options: {}, shade type: {}, pcolor: {}, scolor: {}",
        wallpaper.options, wallpaper.shade_type, wallpaper.pcolor, wallpaper.scolor
    );
    let _ = writeln!(out, "    {}", details.dimmed());
    out
}

/// Prints a heading followed by every wallpaper.
pub fn print_wallpapers(title: &str, wallpapers: &[Wallpaper<'_>]) {
    println!("{}", heading(title));
    for wallpaper in wallpapers {
        println!("{}", format_wallpaper(wallpaper));
    }
}

/// Formats a failure message.
#[must_use]
pub fn error(message: &str) -> String { message.red().bold().to_string() }

/// Formats a hint the user can act on.
#[must_use]
pub fn hint(message: &str) -> String { message.yellow().to_string() }

/// Formats a success message.
#[must_use]
pub fn success(message: &str) -> String { message.bright_green().to_string() }

/// Formats a plain progress line.
#[must_use]
pub fn progress(message: &str) -> String { message.dimmed().to_string() }
