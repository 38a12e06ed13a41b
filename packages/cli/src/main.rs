#![allow(clippy::multiple_crate_versions)]

//! zbg - register numbered images as a timed GNOME/Zorin desktop background.

use colored::Colorize;
use zbg_lib::cli::output;
use zbg_lib::error::ZbgError;

fn main() {
    if let Err(err) = zbg_lib::cli::run() {
        eprintln!("{} {}", "zbg:".bold(), output::error(&err.to_string()));
        if err.needs_elevation() {
            eprintln!("{}", output::hint("In order to manipulate some files sudo access is required."));
        } else if matches!(err, ZbgError::Install { .. }) {
            eprintln!("{}", output::hint("The registration may be incomplete; re-run it once the problem is fixed."));
        }
        std::process::exit(1);
    }
}
