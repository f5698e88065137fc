//! Install sequence end to end against in-memory adapters.

use std::io;
use std::path::{Path, PathBuf};

use faasd_adapters::{
    BasicAuthSecrets, LocalFilesystem, MemoryFilesystem, RecordingServiceManager,
    secrets::{PASSWORD_FILE, PASSWORD_LEN, USER_FILE},
};
use faasd_core::prelude::*;

const PROMETHEUS: &str = "global:\n  scrape_interval: 15s\n";
const RESOLV: &str = "nameserver 8.8.8.8\n";

struct Host {
    fs: MemoryFilesystem,
    services: RecordingServiceManager,
    layout: InstallLayout,
}

impl Host {
    /// Release directory with both config files and both binaries installed.
    fn ready() -> Self {
        let fs = MemoryFilesystem::new();
        fs.add_file("/release/prometheus.yml", PROMETHEUS);
        fs.add_file("/release/resolv.conf", RESOLV);
        fs.add_file("/usr/local/bin/faas-containerd", "elf");
        fs.add_file("/usr/local/bin/faasd", "elf");

        Self {
            fs,
            services: RecordingServiceManager::new(),
            layout: InstallLayout::new(
                "/run/faasd",
                "/run/faas-containerd",
                "/usr/local/bin",
                "/release",
            ),
        }
    }

    fn service(&self) -> InstallService {
        InstallService::new(
            self.layout.clone(),
            Box::new(self.fs.clone()),
            Box::new(BasicAuthSecrets::new(self.fs.clone())),
            Box::new(self.services.clone()),
        )
    }

    fn secret(&self, name: &str) -> Option<Vec<u8>> {
        self.fs.read_file(Path::new("/run/faasd/secrets").join(name))
    }
}

fn expected_activation_calls() -> Vec<&'static str> {
    vec![
        "install faas-containerd",
        "install faasd",
        "daemon-reload",
        "enable faas-containerd",
        "enable faasd",
        "start faas-containerd",
        "start faasd",
    ]
}

#[test]
fn fresh_host_full_install() {
    let host = Host::ready();

    let report = host.service().run(false).unwrap();

    assert!(report.activated());
    assert_eq!(report.completed.len(), 10);
    assert!(host.fs.is_dir("/run/faasd/secrets"));
    assert!(host.fs.is_dir("/run/faas-containerd"));
    assert_eq!(host.fs.dir_mode("/run/faasd/secrets"), Some(0o700));
    assert_eq!(host.secret(USER_FILE).unwrap(), b"admin");
    assert!(!host.secret(PASSWORD_FILE).unwrap().is_empty());
    assert_eq!(
        host.fs.read_file("/run/faasd/prometheus.yml").unwrap(),
        PROMETHEUS.as_bytes()
    );
    assert_eq!(
        host.fs.read_file("/run/faasd/resolv.conf").unwrap(),
        RESOLV.as_bytes()
    );
    assert_eq!(host.services.calls(), expected_activation_calls());

    let units = host.services.installed_units();
    assert_eq!(units[0].get("Cwd"), Some("/run/faas-containerd"));
    assert_eq!(units[0].get("SecretMountPath"), Some("/run/faasd/secrets"));
    assert_eq!(units[1].get("Cwd"), Some("/run/faasd"));
}

#[test]
fn prepare_only_never_touches_services() {
    let host = Host::ready();

    let report = host.service().run(true).unwrap();

    assert!(report.prepare_only);
    assert!(!report.activated());
    assert!(host.fs.read_file("/run/faasd/resolv.conf").is_some());
    assert!(host.services.calls().is_empty());
}

#[test]
fn prepare_only_succeeds_without_binaries() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/release/prometheus.yml", PROMETHEUS);
    fs.add_file("/release/resolv.conf", RESOLV);
    let host = Host {
        fs,
        ..Host::ready()
    };

    assert!(host.service().run(true).is_ok());
}

#[test]
fn second_run_converges_to_same_state() {
    let host = Host::ready();
    host.service().run(false).unwrap();
    let password = host.secret(PASSWORD_FILE).unwrap();
    let files = host.fs.list_files();

    host.service().run(false).unwrap();

    assert_eq!(host.secret(PASSWORD_FILE).unwrap(), password);
    assert_eq!(host.fs.list_files(), files);
    assert_eq!(host.services.calls().len(), 2 * expected_activation_calls().len());
}

#[test]
fn rerun_overwrites_stale_config_with_shorter_source() {
    let host = Host::ready();
    host.fs.add_file(
        "/run/faasd/resolv.conf",
        "nameserver 10.0.0.1\nnameserver 10.0.0.2\nsearch corp.example\n",
    );

    host.service().run(true).unwrap();

    assert_eq!(
        host.fs.read_file("/run/faasd/resolv.conf").unwrap(),
        RESOLV.as_bytes()
    );
}

#[test]
fn missing_binary_stops_before_services() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/release/prometheus.yml", PROMETHEUS);
    fs.add_file("/release/resolv.conf", RESOLV);
    fs.add_file("/usr/local/bin/faas-containerd", "elf");
    let host = Host {
        fs,
        ..Host::ready()
    };

    let err = host.service().run(false).unwrap_err();

    match &err {
        InstallError::BinaryMissing { path } => {
            assert_eq!(path, &PathBuf::from("/usr/local/bin/faasd"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::NotFound);
    // Preparation still happened.
    assert!(host.fs.read_file("/run/faasd/prometheus.yml").is_some());
    assert!(host.services.calls().is_empty());
}

#[test]
fn unwritable_secrets_dir_aborts_before_copying() {
    let host = Host::ready();
    host.fs.deny_files_under("/run/faasd/secrets");

    let err = host.service().run(false).unwrap_err();

    assert!(err.to_string().contains("cannot create basic-auth-* files"));
    assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    assert!(host.fs.read_file("/run/faasd/prometheus.yml").is_none());
    assert!(host.services.calls().is_empty());
}

#[test]
fn missing_source_config_is_reported() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/release/prometheus.yml", PROMETHEUS);
    let host = Host {
        fs,
        ..Host::ready()
    };

    let err = host.service().run(true).unwrap_err();

    assert!(matches!(
        err,
        InstallError::SourceUnreadable { ref path, .. } if path == Path::new("/release/resolv.conf")
    ));
    // prometheus.yml was copied before the failure.
    assert!(host.fs.read_file("/run/faasd/prometheus.yml").is_some());
}

#[test]
fn failing_start_stops_the_sequence() {
    let host = Host::ready();
    host.services.fail_on("start faas-containerd");

    let err = host.service().run(false).unwrap_err();

    assert!(matches!(err, InstallError::ServiceStart { ref unit, .. } if unit == "faas-containerd"));
    assert_eq!(host.services.calls().last().unwrap(), "start faas-containerd");
    assert!(!host.services.calls().contains(&"start faasd".to_string()));
}

#[test]
fn file_in_place_of_working_dir_is_rejected() {
    let host = Host::ready();
    host.fs.add_file("/run/faas-containerd", "not a directory");

    let err = host.service().run(true).unwrap_err();

    assert!(matches!(err, InstallError::NotADirectory { .. }));
}

#[test]
fn interrupted_secret_write_is_resumed() {
    let host = Host::ready();
    host.fs
        .create_dir_all(Path::new("/run/faasd/secrets"), 0o700)
        .unwrap();
    host.fs.add_file("/run/faasd/secrets/basic-auth-password", "");

    host.service().run(true).unwrap();

    assert_eq!(host.secret(PASSWORD_FILE).unwrap().len(), PASSWORD_LEN);
}

#[test]
fn running_from_the_working_dir_keeps_shipped_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let wd = tmp.path().join("run/faasd");
    std::fs::create_dir_all(&wd).unwrap();
    std::fs::write(wd.join("prometheus.yml"), PROMETHEUS).unwrap();
    std::fs::write(wd.join("resolv.conf"), RESOLV).unwrap();
    let layout = InstallLayout::new(
        &wd,
        tmp.path().join("run/faas-containerd"),
        "/usr/local/bin",
        &wd,
    );
    let service = || {
        InstallService::new(
            layout.clone(),
            Box::new(LocalFilesystem::new()),
            Box::new(BasicAuthSecrets::new(LocalFilesystem::new())),
            Box::new(RecordingServiceManager::new()),
        )
    };

    service().run(true).unwrap();
    service().run(true).unwrap();

    assert_eq!(std::fs::read_to_string(wd.join("prometheus.yml")).unwrap(), PROMETHEUS);
    assert_eq!(std::fs::read_to_string(wd.join("resolv.conf")).unwrap(), RESOLV);
}
