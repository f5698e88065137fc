//! Install layout: where everything lives on the host.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::unit::UnitDescriptor,
    error::DomainError,
};

/// Unit name of the provider service (second working directory).
pub const CONTAINERD_SERVICE: &str = "faas-containerd";

/// Unit name of the gateway service (first working directory).
pub const FAASD_SERVICE: &str = "faasd";

/// Binaries that must be present in [`InstallLayout::bin_dir`] before any
/// unit is registered. Checked in this order.
pub const REQUIRED_BINARIES: [&str; 2] = [CONTAINERD_SERVICE, FAASD_SERVICE];

/// Config files shipped next to the installer and copied into the faasd
/// working directory. Copied in this order.
pub const SHIPPED_CONFIG_FILES: [&str; 2] = ["prometheus.yml", "resolv.conf"];

/// Name of the secrets subdirectory inside the faasd working directory.
pub const SECRETS_SUBDIR: &str = "secrets";

/// Mode for every directory the installer creates (owner rwx).
pub const DIR_MODE: u32 = 0o700;

/// Mode for copied config files.
pub const CONFIG_FILE_MODE: u32 = 0o644;

/// Placeholder key for a unit's working directory.
pub const CWD_KEY: &str = "Cwd";

/// Placeholder key for the provider's secret mount path.
pub const SECRET_MOUNT_PATH_KEY: &str = "SecretMountPath";

/// Fixed filesystem locations used by one install run.
///
/// A value object: built once at startup (from configuration) and never
/// mutated, so tests can point every path at a scratch directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallLayout {
    /// Working directory of the `faasd` service.
    pub faasd_dir: PathBuf,
    /// Working directory of the `faas-containerd` service.
    pub containerd_dir: PathBuf,
    /// Directory the required binaries are installed into.
    pub bin_dir: PathBuf,
    /// Directory the shipped config files are read from.
    pub source_dir: PathBuf,
}

impl Default for InstallLayout {
    fn default() -> Self {
        Self {
            faasd_dir: PathBuf::from("/run/faasd"),
            containerd_dir: PathBuf::from("/run/faas-containerd"),
            bin_dir: PathBuf::from("/usr/local/bin"),
            source_dir: PathBuf::from("."),
        }
    }
}

impl InstallLayout {
    pub fn new(
        faasd_dir: impl Into<PathBuf>,
        containerd_dir: impl Into<PathBuf>,
        bin_dir: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            faasd_dir: faasd_dir.into(),
            containerd_dir: containerd_dir.into(),
            bin_dir: bin_dir.into(),
            source_dir: source_dir.into(),
        }
    }

    /// `<faasd_dir>/secrets`
    pub fn secrets_dir(&self) -> PathBuf {
        self.faasd_dir.join(SECRETS_SUBDIR)
    }

    /// Where a shipped config file is read from.
    pub fn config_source(&self, file_name: &str) -> PathBuf {
        self.source_dir.join(file_name)
    }

    pub fn binary_path(&self, name: &str) -> PathBuf {
        self.bin_dir.join(name)
    }

    /// Descriptor for the provider unit: working directory plus the secret
    /// mount path it hands to function containers.
    pub fn containerd_unit(&self) -> UnitDescriptor {
        UnitDescriptor::new(CONTAINERD_SERVICE)
            .with_substitution(CWD_KEY, path_value(&self.containerd_dir))
            .with_substitution(SECRET_MOUNT_PATH_KEY, path_value(&self.secrets_dir()))
    }

    /// Descriptor for the gateway unit.
    pub fn faasd_unit(&self) -> UnitDescriptor {
        UnitDescriptor::new(FAASD_SERVICE).with_substitution(CWD_KEY, path_value(&self.faasd_dir))
    }

    /// Check the layout before anything touches the host.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_absolute("faasd_dir", &self.faasd_dir)?;
        require_absolute("containerd_dir", &self.containerd_dir)?;
        require_absolute("bin_dir", &self.bin_dir)?;

        if self.source_dir.as_os_str().is_empty() {
            return Err(DomainError::InvalidLayout {
                field: "source_dir",
                reason: "must not be empty".into(),
            });
        }

        if self.faasd_dir == self.containerd_dir {
            return Err(DomainError::InvalidLayout {
                field: "containerd_dir",
                reason: format!(
                    "must differ from faasd_dir ({})",
                    self.faasd_dir.display()
                ),
            });
        }

        Ok(())
    }
}

fn require_absolute(field: &'static str, path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(DomainError::InvalidLayout {
            field,
            reason: format!("must be an absolute path, got '{}'", path.display()),
        })
    }
}

fn path_value(path: &Path) -> String {
    path.display().to_string()
}
