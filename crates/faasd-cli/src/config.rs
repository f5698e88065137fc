//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`InstallLayout`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables: `FAASD__<SECTION>__<KEY>`, e.g.
//!    `FAASD__PATHS__FAASD_DIR=/srv/faasd`
//! 2. Config file: `--config <FILE>` (must exist) or
//!    `/etc/faasd/install.toml` (optional)
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use faasd_adapters::systemd::{DEFAULT_SYSTEMCTL, DEFAULT_TEMPLATES_DIR, DEFAULT_UNIT_DIR};
use faasd_core::domain::InstallLayout;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/faasd/install.toml";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "FAASD";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host locations used by the install sequence.
    pub paths: InstallLayout,
    /// Where unit templates live and how systemd is driven.
    pub systemd: SystemdConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemdConfig {
    pub templates_dir: PathBuf,
    pub unit_dir: PathBuf,
    pub systemctl: PathBuf,
}

impl Default for SystemdConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
            systemctl: PathBuf::from(DEFAULT_SYSTEMCTL),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Layout handed to the install service.
    pub fn layout(&self) -> InstallLayout {
        self.paths.clone()
    }
}
