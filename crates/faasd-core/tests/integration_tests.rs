//! Integration tests for faasd-core through its public API.

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use faasd_core::prelude::*;

/// Directories and files in a shared map; good enough for the prepare phase.
#[derive(Clone, Default)]
struct Host {
    entries: Arc<Mutex<HashMap<PathBuf, Option<Vec<u8>>>>>,
}

impl Host {
    fn with_file(self, path: &str, content: &str) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), Some(content.as_bytes().to_vec()));
        self
    }

    fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(Path::new(path)).cloned().flatten()
    }
}

struct HostWriter {
    host: Host,
    path: PathBuf,
}

impl Write for HostWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut entries = self.host.entries.lock().unwrap();
        if let Some(Some(content)) = entries.get_mut(&self.path) {
            content.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Filesystem for Host {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        match self.entries.lock().unwrap().get(path) {
            None => EntryKind::Missing,
            Some(None) => EntryKind::Directory,
            Some(Some(_)) => EntryKind::Other,
        }
    }

    fn create_dir_all(&self, path: &Path, _mode: u32) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        for ancestor in path.ancestors() {
            entries.entry(ancestor.to_path_buf()).or_insert(None);
        }
        Ok(())
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self.file(&path.to_string_lossy())
            .map(|c| Box::new(Cursor::new(c)) as Box<dyn Read + Send>)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn create_file(&self, path: &Path, _mode: u32) -> io::Result<Box<dyn Write + Send>> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Some(Vec::new()));
        Ok(Box::new(HostWriter {
            host: self.clone(),
            path: path.to_path_buf(),
        }))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let content = entries
            .remove(from)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        entries.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        a == b && self.file(&a.to_string_lossy()).is_some()
    }
}

struct NoSecrets;

impl SecretGenerator for NoSecrets {
    fn generate(&self, _secrets_dir: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Fails the test if the install ever reaches systemd.
struct Untouchable;

impl ServiceManager for Untouchable {
    fn install_unit(&self, unit: &UnitDescriptor) -> Result<(), CollaboratorError> {
        panic!("unexpected install_unit({unit})")
    }

    fn daemon_reload(&self) -> Result<(), CollaboratorError> {
        panic!("unexpected daemon_reload")
    }

    fn enable(&self, name: &str) -> Result<(), CollaboratorError> {
        panic!("unexpected enable({name})")
    }

    fn start(&self, name: &str) -> Result<(), CollaboratorError> {
        panic!("unexpected start({name})")
    }
}

fn service(layout: InstallLayout, host: Host) -> InstallService {
    InstallService::new(
        layout,
        Box::new(host),
        Box::new(NoSecrets),
        Box::new(Untouchable),
    )
}

fn layout() -> InstallLayout {
    InstallLayout::new("/run/faasd", "/run/faas-containerd", "/usr/local/bin", "/release")
}

#[test]
fn prepare_only_copies_config_and_reports_five_steps() {
    let host = Host::default()
        .with_file("/release/prometheus.yml", "scrape_configs: []\n")
        .with_file("/release/resolv.conf", "nameserver 1.1.1.1\n");

    let report = service(layout(), host.clone()).run(true).unwrap();

    assert!(report.prepare_only);
    assert!(!report.activated());
    assert_eq!(report.completed.len(), 5);
    assert!(report.completed.iter().all(|s| !s.is_activation()));
    assert_eq!(
        host.file("/run/faasd/resolv.conf").unwrap(),
        b"nameserver 1.1.1.1\n"
    );
}

#[test]
fn invalid_layout_fails_before_touching_the_host() {
    let host = Host::default();
    let mut bad = layout();
    bad.containerd_dir = bad.faasd_dir.clone();

    let err = service(bad, host.clone()).run(true).unwrap_err();

    assert!(matches!(err, InstallError::InvalidLayout(_)));
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(host.entry_kind(Path::new("/run/faasd")), EntryKind::Missing);
}

#[test]
fn report_serialises_steps_with_tags() {
    let host = Host::default()
        .with_file("/release/prometheus.yml", "")
        .with_file("/release/resolv.conf", "");

    let report = service(layout(), host).run(true).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["completed"][0]["step"], "ensure_secrets_dir");
    assert_eq!(json["completed"][4]["file"], "resolv.conf");
}
