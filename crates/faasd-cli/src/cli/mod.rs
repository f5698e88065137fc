//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "faasd",
    bin_name = "faasd",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Install faasd and faas-containerd as systemd services",
    long_about = "Prepares the faasd working directories, generates gateway \
                  basic-auth credentials, copies the shipped configuration \
                  and registers, enables and starts both systemd units.",
    after_help = "EXAMPLES:\n\
        \x20 sudo faasd install\n\
        \x20 faasd install --prepare\n\
        \x20 faasd completions bash > /usr/share/bash-completion/completions/faasd",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install faasd on this host.
    #[command(
        about = "Install faasd",
        after_help = "EXAMPLES:\n\
            \x20 sudo faasd install            # full install, services started\n\
            \x20 faasd install --prepare       # directories, secrets and config only\n\
            \x20 faasd install -c install.toml # custom paths"
    )]
    Install(InstallArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 faasd completions bash > ~/.local/share/bash-completion/completions/faasd\n\
            \x20 faasd completions zsh  > ~/.zfunc/_faasd\n\
            \x20 faasd completions fish > ~/.config/fish/completions/faasd.fish"
    )]
    Completions(CompletionsArgs),
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `faasd install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Stop after preparing directories, secrets and config files.
    #[arg(
        long = "prepare",
        help = "Prepare only: do not verify binaries or touch systemd"
    )]
    pub prepare: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `faasd completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn install_defaults_to_full_install() {
        let cli = Cli::try_parse_from(["faasd", "install"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert!(!args.prepare),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn install_prepare_flag() {
        let cli = Cli::try_parse_from(["faasd", "install", "--prepare"]).unwrap();
        assert!(matches!(cli.command, Commands::Install(InstallArgs { prepare: true })));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["faasd", "install", "-vv", "--output-format", "json"])
            .unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["faasd", "-q", "-v", "install"]).is_err());
    }

    #[test]
    fn short_config_flag_and_default_format() {
        let cli = Cli::try_parse_from(["faasd", "-c", "/tmp/install.toml", "install"]).unwrap();
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/install.toml")));
        assert_eq!(cli.global.output_format, OutputFormat::Auto);
    }

    #[test]
    fn config_help_names_default_file_and_env_overrides() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("/etc/faasd/install.toml"));
        assert!(help.contains("FAASD__PATHS__BIN_DIR"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["faasd"]).is_err());
    }
}
