//! Install sequence errors.
//!
//! One variant per way a step can fail. The orchestrator never recovers
//! locally, so every variant keeps its underlying cause reachable through
//! `std::error::Error::source`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::application::ports::CollaboratorError;
use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that abort the install sequence.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The layout was rejected before any step ran.
    #[error(transparent)]
    InvalidLayout(#[from] DomainError),

    /// A working directory could not be created.
    #[error("cannot create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Something other than a directory occupies a working directory path.
    #[error("{path} exists but is not a directory")]
    NotADirectory { path: PathBuf },

    /// The secret generator failed; the generator's error is the source.
    #[error("cannot create basic-auth-* files in {path}: {source}")]
    SecretGeneration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A shipped config file could not be opened.
    #[error("cannot read {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The copy destination could not be created.
    #[error("cannot write {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Both ends opened but streaming the bytes failed.
    #[error("copying {from} to {to} failed: {source}")]
    CopyInterrupted {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required binary is not installed.
    #[error("unable to stat {path}, install this binary before continuing")]
    BinaryMissing { path: PathBuf },

    #[error("cannot install unit {unit}: {source}")]
    UnitInstall {
        unit: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("daemon-reload failed: {source}")]
    DaemonReload {
        #[source]
        source: CollaboratorError,
    },

    #[error("cannot enable {unit}: {source}")]
    ServiceEnable {
        unit: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("cannot start {unit}: {source}")]
    ServiceStart {
        unit: String,
        #[source]
        source: CollaboratorError,
    },
}

impl InstallError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLayout(e) => e.suggestions(),
            Self::DirectoryCreation { path, .. } => vec![
                format!("Failed to create: {}", path.display()),
                "Run the installer as root (e.g. with sudo)".into(),
                "Check that every parent of the path is a directory".into(),
            ],
            Self::NotADirectory { path } => vec![
                format!("Remove or rename the file at {}", path.display()),
                "Then re-run the install; completed steps are skipped safely".into(),
            ],
            Self::SecretGeneration { path, .. } => vec![
                format!("Check that {} is writable", path.display()),
                "Run the installer as root (e.g. with sudo)".into(),
            ],
            Self::SourceUnreadable { path, .. } => vec![
                format!("Expected a shipped config file at {}", path.display()),
                "Run the installer from the directory containing the release files".into(),
            ],
            Self::DestinationUnwritable { path, .. } | Self::CopyInterrupted { to: path, .. } => {
                vec![
                    format!("Check that {} is writable", path.display()),
                    "Check available disk space".into(),
                ]
            }
            Self::BinaryMissing { path } => vec![
                format!("Install the binary at {}", path.display()),
                "Or run `faasd install --prepare` to set up directories and secrets only".into(),
            ],
            Self::UnitInstall { unit, .. } => vec![
                format!("Check that the unit template for {} exists", unit),
                "Check that the systemd unit directory is writable".into(),
            ],
            Self::DaemonReload { .. } => vec![
                "Check that systemd is running: systemctl status".into(),
            ],
            Self::ServiceEnable { unit, .. } | Self::ServiceStart { unit, .. } => vec![
                format!("Inspect the service: systemctl status {}", unit),
                format!("Read its logs: journalctl -u {}", unit),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLayout(_) => ErrorCategory::Configuration,
            Self::NotADirectory { .. } => ErrorCategory::Validation,
            Self::BinaryMissing { .. } | Self::SourceUnreadable { .. } => ErrorCategory::NotFound,
            Self::DirectoryCreation { .. }
            | Self::SecretGeneration { .. }
            | Self::DestinationUnwritable { .. }
            | Self::CopyInterrupted { .. }
            | Self::UnitInstall { .. }
            | Self::DaemonReload { .. }
            | Self::ServiceEnable { .. }
            | Self::ServiceStart { .. } => ErrorCategory::Internal,
        }
    }

    /// The `io::ErrorKind` of the underlying cause, for filesystem failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::DirectoryCreation { source, .. }
            | Self::SecretGeneration { source, .. }
            | Self::SourceUnreadable { source, .. }
            | Self::DestinationUnwritable { source, .. }
            | Self::CopyInterrupted { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_generation_shows_its_cause() {
        let err = InstallError::SecretGeneration {
            path: PathBuf::from("/run/faasd/secrets"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };

        assert_eq!(
            err.to_string(),
            "cannot create basic-auth-* files in /run/faasd/secrets: Permission denied"
        );
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn missing_binary_is_not_found() {
        let err = InstallError::BinaryMissing {
            path: PathBuf::from("/usr/local/bin/faasd"),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.io_kind(), None);
    }
}
