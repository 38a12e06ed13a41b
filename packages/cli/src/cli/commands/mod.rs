//! CLI command definitions using Clap.
//!
//! - `list` - Print the wallpapers of both registries
//! - `register` - Install a directory of images as a timed background

use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::error::ZbgError;

pub mod list;
pub mod register;

pub use register::RegisterArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Zorin Background - register numbered images as a timed desktop background.
#[derive(Parser, Debug)]
#[command(name = "zbg")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output. `NO_COLOR` is honored as well.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Get all currently registered wallpapers.
    #[command(
        visible_alias = "backgrounds",
        after_long_help = r#"Examples:
  zbg list          # Colored listing of both registries
  zbg list --json   # Both registries as a JSON object"#
    )]
    List {
        /// Output in JSON format, with every field of every entry.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Register a new timed background.
    ///
    /// Copies the numbered images of DIRECTORY into the backgrounds directory,
    /// generates a looping slideshow and adds it to the wallpaper registry.
    /// Writing to the system directories usually requires sudo.
    #[command(after_long_help = r#"Examples:
  sudo zbg register ~/Pictures/mojave/               # Named `Mojave`, 24h cycle
  sudo zbg register ~/Pictures/mojave/ -n Desert     # Explicit name
  sudo zbg register ./slides/ -h 1 -m 30             # 90 minute cycle
  zbg register ./slides/ --dry-run                   # Show the plan only"#)]
    Register(RegisterArgs),

    /// Output the zbg configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// zbg configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(zbg completions --shell zsh)"
    ///   zbg completions --shell bash > ~/.local/share/bash-completion/completions/zbg
    ///   zbg completions --shell fish > ~/.config/fish/completions/zbg.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command.
    ///
    /// The configuration is only loaded by commands that need it, so a broken
    /// file never blocks `schema` or `completions`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), ZbgError> {
        match &self.command {
            Commands::List { json } => list::execute(*json, &self.load_config()?),
            Commands::Register(args) => register::execute(args, &self.load_config()?),

            Commands::Schema => {
                println!("{}", config::generate_schema_json()?);
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn load_config(&self) -> Result<config::ZbgConfig, ZbgError> {
        let custom = self.config_path();
        let (config, _source) = config::load(custom.as_deref().map(Path::new))?;
        Ok(config)
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "zbg", &mut io::stdout());
    }
}
