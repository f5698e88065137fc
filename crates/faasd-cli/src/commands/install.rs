//! Implementation of the `faasd install` command.
//!
//! Responsibility: wire the production adapters into the core install
//! service, run it, and display the report. No business logic lives here.

use tracing::{debug, instrument};

use faasd_adapters::{BasicAuthSecrets, LocalFilesystem, SystemdManager, secrets::PASSWORD_FILE};
use faasd_core::{
    application::InstallService,
    domain::{InstallLayout, InstallReport},
};

use crate::{
    cli::{InstallArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `faasd install` command.
#[instrument(skip_all, fields(prepare = args.prepare))]
pub fn execute(args: InstallArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_service(&config);
    let layout = service.layout().clone();

    debug!(
        faasd_dir = %layout.faasd_dir.display(),
        containerd_dir = %layout.containerd_dir.display(),
        bin_dir = %layout.bin_dir.display(),
        source_dir = %layout.source_dir.display(),
        "Layout resolved"
    );

    let human = output.format() != OutputFormat::Json;
    if human {
        let what = if args.prepare { "Preparing" } else { "Installing" };
        output.header(&format!("{what} faasd"))?;
    }

    let report = service.run(args.prepare)?;
    output.report(&report)?;

    if human {
        print_summary(&report, &layout, &output)?;
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> InstallService {
    let filesystem = LocalFilesystem::new();
    let services = SystemdManager::new(
        config.systemd.templates_dir.clone(),
        config.systemd.unit_dir.clone(),
        config.systemd.systemctl.clone(),
    );

    InstallService::new(
        config.layout(),
        Box::new(filesystem),
        Box::new(BasicAuthSecrets::new(filesystem)),
        Box::new(services),
    )
}

fn print_summary(
    report: &InstallReport,
    layout: &InstallLayout,
    output: &OutputManager,
) -> CliResult<()> {
    output.info(&format!(
        "Gateway credentials: {}",
        layout.secrets_dir().join(PASSWORD_FILE).display()
    ))?;

    if report.activated() {
        output.info("Check the services with: systemctl status faasd faas-containerd")?;
    } else {
        output.info("Prepared only: install the binaries, then run 'faasd install'")?;
    }
    Ok(())
}
