//! Errors raised by infrastructure adapters.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while talking to systemd.
#[derive(Debug, Error)]
pub enum SystemdError {
    #[error("cannot read unit template {path}: {source}")]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unit template for {unit} references unknown value '{key}'")]
    UnresolvedPlaceholder { unit: String, key: String },

    #[error("cannot write unit file {path}: {source}")]
    UnitWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
}

impl SystemdError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateUnreadable { path, .. } => vec![format!(
                "Run the installer from the directory containing {}",
                path.parent().map(|p| p.display().to_string()).unwrap_or_default()
            )],
            Self::UnresolvedPlaceholder { key, .. } => {
                vec![format!("Remove {{{{.{key}}}}} from the template or supply a value for it")]
            }
            Self::UnitWrite { .. } => vec!["Run the installer as root".to_string()],
            Self::Spawn { .. } => vec!["Check that systemd is installed and on PATH".to_string()],
            Self::CommandFailed { .. } => {
                vec!["Inspect the unit with 'journalctl -xe'".to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_names_command_and_stderr() {
        let err = SystemdError::CommandFailed {
            command: "systemctl start faasd".into(),
            status: "exit status: 5".into(),
            stderr: "Unit faasd.service not found.".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("systemctl start faasd"));
        assert!(msg.contains("Unit faasd.service not found."));
    }

    #[test]
    fn placeholder_suggestion_shows_template_syntax() {
        let err = SystemdError::UnresolvedPlaceholder {
            unit: "faasd".into(),
            key: "Cwd".into(),
        };
        assert!(err.suggestions()[0].contains("{{.Cwd}}"));
    }
}
