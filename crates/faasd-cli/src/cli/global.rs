//! Flags shared by every `faasd` subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

/// Logging, output and configuration flags.
///
/// Flattened into [`super::Cli`] with `global = true`, so they may appear
/// before or after the subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: -v for each install step, -vv for skipped steps and
    /// systemctl invocations, -vvv for everything.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never colour output. Also set by `NO_COLOR`.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Install settings in TOML.
    ///
    /// Without this flag `/etc/faasd/install.toml` is read when it exists.
    /// Any key can be overridden from the environment as
    /// `FAASD__<SECTION>__<KEY>`, for example `FAASD__PATHS__BIN_DIR`.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How to print the install report.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,
}

/// Rendering of the install report and status lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured status lines.
    Human,
    /// Status lines without colour.
    Plain,
    /// One JSON report object on stdout, JSON logs on stderr.
    Json,
}
