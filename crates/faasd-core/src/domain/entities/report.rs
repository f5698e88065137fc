//! Install progress: the steps of the sequence and the report of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One transition of the install state machine.
///
/// ```text
/// INIT → EnsureSecretsDir → EnsureContainerdDir → GenerateSecrets
///      → CopyConfig(prometheus.yml) → CopyConfig(resolv.conf)
///      → [prepare only? → DONE]
///      → VerifyBinaries → InstallUnits → DaemonReload
///      → EnableServices → StartServices → DONE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    EnsureSecretsDir,
    EnsureContainerdDir,
    GenerateSecrets,
    CopyConfig { file: String },
    VerifyBinaries,
    InstallUnits,
    DaemonReload,
    EnableServices,
    StartServices,
}

impl Step {
    /// `true` for steps after the prepare-only branch point.
    pub fn is_activation(&self) -> bool {
        matches!(
            self,
            Self::VerifyBinaries
                | Self::InstallUnits
                | Self::DaemonReload
                | Self::EnableServices
                | Self::StartServices
        )
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureSecretsDir => write!(f, "ensure secrets directory"),
            Self::EnsureContainerdDir => write!(f, "ensure faas-containerd directory"),
            Self::GenerateSecrets => write!(f, "generate basic-auth secrets"),
            Self::CopyConfig { file } => write!(f, "copy {file}"),
            Self::VerifyBinaries => write!(f, "verify binaries"),
            Self::InstallUnits => write!(f, "install units"),
            Self::DaemonReload => write!(f, "reload systemd"),
            Self::EnableServices => write!(f, "enable services"),
            Self::StartServices => write!(f, "start services"),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    pub prepare_only: bool,
    pub completed: Vec<Step>,
}

impl InstallReport {
    pub fn new(prepare_only: bool) -> Self {
        Self {
            prepare_only,
            completed: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, step: Step) {
        self.completed.push(step);
    }

    /// `true` if services were registered and started.
    pub fn activated(&self) -> bool {
        self.completed.contains(&Step::StartServices)
    }
}
