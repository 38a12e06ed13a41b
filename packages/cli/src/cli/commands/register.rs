//! `zbg register`: installs a directory of numbered images as a timed background.

use clap::{ArgAction, Args};

use crate::background::CycleDuration;
use crate::cli::output;
use crate::config::ZbgConfig;
use crate::error::ZbgError;
use crate::registration::{self, RegisterRequest};

/// Arguments of the register command.
///
/// `-h` sets the hours, so help is only available as `--help`.
#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RegisterArgs {
    /// Directory holding the numbered JPG or PNG images.
    #[arg(value_name = "DIRECTORY")]
    pub directory: String,

    /// The background name. Defaults to the directory name.
    #[arg(long, short)]
    pub name: Option<String>,

    /// Hours a full cycle through all images takes. Defaults to 24.
    #[arg(long, short = 'h')]
    pub hours: Option<u64>,

    /// Minutes added to the hours.
    #[arg(long, short)]
    pub minutes: Option<u64>,

    /// Seconds added to the hours and minutes.
    #[arg(long, short)]
    pub seconds: Option<u64>,

    /// Print what would be installed without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl RegisterArgs {
    /// Cycle duration from the flags, falling back to the configured default
    /// for every flag that was not given.
    #[must_use]
    pub fn cycle(&self, config: &ZbgConfig) -> CycleDuration {
        let default = config.cycle;
        CycleDuration::new(
            self.hours.unwrap_or(default.hours),
            self.minutes.unwrap_or(default.minutes),
            self.seconds.unwrap_or(default.seconds),
        )
    }
}

/// Execute the register command.
///
/// # Errors
///
/// Returns an error if a precondition fails or installation fails midway.
pub fn execute(args: &RegisterArgs, config: &ZbgConfig) -> Result<(), ZbgError> {
    let request = RegisterRequest {
        directory: &args.directory,
        name: args.name.as_deref(),
        cycle: args.cycle(config),
    };

    let registration = registration::plan(&request, config)?;

    if args.dry_run {
        println!("{}", output::heading(&format!("Would register `{}`:", registration.display_name)));
        println!("  images:     {}", registration.image_count);
        println!("  lifecycle:  {:.1}s per image ({})", registration.duration, request.cycle);
        println!("  install to: {}", registration.install_dir.display());
        println!("  document:   {}", registration.timed_document.display());
        println!("  registry:   {}", registration.registry.display());
        if registration.replaces_existing {
            println!("  replaces an existing entry with the same name");
        }
        match registration::check_write_access(&registration) {
            Ok(()) => println!("  write access: ok"),
            Err(err) => println!("  write access: {}", output::hint(&format!("{err}, re-run with sudo"))),
        }
        return Ok(());
    }

    println!(
        "{}",
        output::progress(&format!(
            "Started copying {} images from `{}`...",
            registration.image_count,
            registration.source.display()
        ))
    );
    registration::install(&registration)?;

    println!(
        "{}",
        output::success(&format!(
            "Your timed background `{}` has been added with a lifecycle of {:.1}s!",
            registration.display_name, registration.duration
        ))
    );

    Ok(())
}
