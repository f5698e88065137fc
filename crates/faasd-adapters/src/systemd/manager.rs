//! Service manager backed by `systemctl`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use faasd_core::{
    application::ports::{CollaboratorError, ServiceManager},
    domain::UnitDescriptor,
};
use tracing::{debug, info, instrument};

use super::template::render_unit;
use crate::error::SystemdError;

/// Default directory holding `<name>.service` templates.
pub const DEFAULT_TEMPLATES_DIR: &str = "hack";

/// Default directory systemd loads unit files from.
pub const DEFAULT_UNIT_DIR: &str = "/lib/systemd/system";

/// Default `systemctl` program.
pub const DEFAULT_SYSTEMCTL: &str = "systemctl";

/// Installs unit files from templates and drives `systemctl`.
#[derive(Debug, Clone)]
pub struct SystemdManager {
    templates_dir: PathBuf,
    unit_dir: PathBuf,
    systemctl: PathBuf,
}

impl SystemdManager {
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        unit_dir: impl Into<PathBuf>,
        systemctl: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            unit_dir: unit_dir.into(),
            systemctl: systemctl.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn unit_dir(&self) -> &Path {
        &self.unit_dir
    }

    fn unit_file(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.service"))
    }

    /// Render and write the unit file, returning where it was written.
    pub fn write_unit(&self, unit: &UnitDescriptor) -> Result<PathBuf, SystemdError> {
        let template_path = Self::unit_file(&self.templates_dir, unit.name());
        let template = fs::read_to_string(&template_path).map_err(|source| {
            SystemdError::TemplateUnreadable {
                path: template_path.clone(),
                source,
            }
        })?;

        let rendered = render_unit(unit.name(), &template, unit.substitutions())?;

        let unit_path = Self::unit_file(&self.unit_dir, unit.name());
        fs::write(&unit_path, rendered).map_err(|source| SystemdError::UnitWrite {
            path: unit_path.clone(),
            source,
        })?;

        Ok(unit_path)
    }

    fn systemctl(&self, args: &[&str]) -> Result<(), SystemdError> {
        let command = std::iter::once(self.systemctl.display().to_string())
            .chain(args.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %command, "Running systemctl");

        let output = Command::new(&self.systemctl)
            .args(args)
            .output()
            .map_err(|source| SystemdError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SystemdError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Default for SystemdManager {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATES_DIR, DEFAULT_UNIT_DIR, DEFAULT_SYSTEMCTL)
    }
}

impl ServiceManager for SystemdManager {
    #[instrument(skip_all, fields(unit = %unit.name()))]
    fn install_unit(&self, unit: &UnitDescriptor) -> Result<(), CollaboratorError> {
        let path = self.write_unit(unit)?;
        info!(path = %path.display(), "Unit file written");
        Ok(())
    }

    #[instrument(skip_all)]
    fn daemon_reload(&self) -> Result<(), CollaboratorError> {
        self.systemctl(&["daemon-reload"])?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn enable(&self, name: &str) -> Result<(), CollaboratorError> {
        self.systemctl(&["enable", name])?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn start(&self, name: &str) -> Result<(), CollaboratorError> {
        self.systemctl(&["start", name])?;
        Ok(())
    }
}
