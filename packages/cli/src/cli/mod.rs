//! CLI module for zbg.
//!
//! All process-wide setup happens here, once, before a command runs: the
//! tracing subscriber and the color override.

mod commands;
pub mod output;

use clap::Parser;
pub use commands::{Cli, RegisterArgs};

use crate::error::ZbgError;
use crate::logging;

/// Runs the CLI.
///
/// Parses command-line arguments, sets up logging and colors, and executes
/// the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), ZbgError> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    cli.execute().inspect_err(|err| {
        tracing::debug!(precondition = err.is_precondition(), error = ?err, "command failed");
    })
}
