//! Install Service - main application orchestrator.
//!
//! Runs the install sequence:
//! 1. Prepare: working directories, secrets, shipped config files
//! 2. Activate: verify binaries, register units, reload, enable, start
//!
//! Every step is idempotent and the first failure aborts the run. Nothing
//! is rolled back: whatever completed is correct and is reused on retry.

use tracing::{error, info, instrument};

use crate::{
    application::{
        InstallError,
        ports::{EntryKind, Filesystem, SecretGenerator, ServiceManager},
        services::primitives::{copy_file, ensure_directory},
    },
    domain::{
        CONTAINERD_SERVICE, FAASD_SERVICE, InstallLayout, InstallReport, REQUIRED_BINARIES,
        SHIPPED_CONFIG_FILES, Step,
    },
    error::InstallResult,
};

/// Main install service.
///
/// Holds the injected layout and collaborators; owns no other state, so a
/// single value can be run any number of times.
pub struct InstallService {
    layout: InstallLayout,
    filesystem: Box<dyn Filesystem>,
    secrets: Box<dyn SecretGenerator>,
    services: Box<dyn ServiceManager>,
}

impl InstallService {
    /// Create a new install service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use faasd_core::{application::InstallService, domain::InstallLayout};
    ///
    /// let service = InstallService::new(
    ///     InstallLayout::default(),
    ///     filesystem, // impl Filesystem
    ///     secrets,    // impl SecretGenerator
    ///     services,   // impl ServiceManager
    /// );
    /// ```
    pub fn new(
        layout: InstallLayout,
        filesystem: Box<dyn Filesystem>,
        secrets: Box<dyn SecretGenerator>,
        services: Box<dyn ServiceManager>,
    ) -> Self {
        Self {
            layout,
            filesystem,
            secrets,
            services,
        }
    }

    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Run the install sequence.
    ///
    /// With `prepare_only`, stops after the shipped config files are copied
    /// and never talks to the service manager.
    #[instrument(
        skip_all,
        fields(
            prepare_only = prepare_only,
            faasd_dir = %self.layout.faasd_dir.display(),
            containerd_dir = %self.layout.containerd_dir.display()
        )
    )]
    pub fn run(&self, prepare_only: bool) -> InstallResult<InstallReport> {
        self.layout.validate()?;

        let mut report = InstallReport::new(prepare_only);
        if let Err(e) = self.execute(prepare_only, &mut report) {
            error!(
                error = %e,
                completed = report.completed.len(),
                "Install aborted"
            );
            return Err(e);
        }

        info!(steps = report.completed.len(), "Install completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    fn execute(&self, prepare_only: bool, report: &mut InstallReport) -> InstallResult<()> {
        self.prepare(report)?;

        if prepare_only {
            info!("Prepare only: skipping service registration");
            return Ok(());
        }

        self.activate(report)
    }

    /// Steps 1-5: directories, secrets, shipped config.
    fn prepare(&self, report: &mut InstallReport) -> InstallResult<()> {
        let fs = self.filesystem.as_ref();
        let secrets_dir = self.layout.secrets_dir();

        ensure_directory(fs, &secrets_dir)?;
        self.completed(report, Step::EnsureSecretsDir);

        ensure_directory(fs, &self.layout.containerd_dir)?;
        self.completed(report, Step::EnsureContainerdDir);

        self.secrets
            .generate(&secrets_dir)
            .map_err(|source| InstallError::SecretGeneration {
                path: secrets_dir.clone(),
                source,
            })?;
        self.completed(report, Step::GenerateSecrets);

        for file in SHIPPED_CONFIG_FILES {
            copy_file(fs, &self.layout.config_source(file), &self.layout.faasd_dir)?;
            self.completed(
                report,
                Step::CopyConfig {
                    file: file.to_string(),
                },
            );
        }

        Ok(())
    }

    /// Steps 7-12: binaries, units, reload, enable, start.
    fn activate(&self, report: &mut InstallReport) -> InstallResult<()> {
        self.verify_binaries()?;
        self.completed(report, Step::VerifyBinaries);

        for unit in [self.layout.containerd_unit(), self.layout.faasd_unit()] {
            self.services
                .install_unit(&unit)
                .map_err(|source| InstallError::UnitInstall {
                    unit: unit.name().to_string(),
                    source,
                })?;
            info!(unit = %unit, "Unit installed");
        }
        self.completed(report, Step::InstallUnits);

        // Enable/start may depend on the manager having re-read definitions.
        self.services
            .daemon_reload()
            .map_err(|source| InstallError::DaemonReload { source })?;
        self.completed(report, Step::DaemonReload);

        for name in [CONTAINERD_SERVICE, FAASD_SERVICE] {
            self.services
                .enable(name)
                .map_err(|source| InstallError::ServiceEnable {
                    unit: name.to_string(),
                    source,
                })?;
        }
        self.completed(report, Step::EnableServices);

        for name in [CONTAINERD_SERVICE, FAASD_SERVICE] {
            self.services
                .start(name)
                .map_err(|source| InstallError::ServiceStart {
                    unit: name.to_string(),
                    source,
                })?;
        }
        self.completed(report, Step::StartServices);

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Hard stop if a binary is absent; the installer never fetches them.
    fn verify_binaries(&self) -> InstallResult<()> {
        for name in REQUIRED_BINARIES {
            let path = self.layout.binary_path(name);
            if self.filesystem.entry_kind(&path) == EntryKind::Missing {
                return Err(InstallError::BinaryMissing { path });
            }
        }
        Ok(())
    }

    fn completed(&self, report: &mut InstallReport, step: Step) {
        info!(step = %step, "Step completed");
        report.record(step);
    }
}
