//! Service manager that records calls instead of running systemd.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use faasd_core::{
    application::ports::{CollaboratorError, ServiceManager},
    domain::UnitDescriptor,
};

/// Records every call as `"<op> <name>"` (for example `"enable faasd"`).
///
/// Clones share the log. Operations registered with [`fail_on`](Self::fail_on)
/// are recorded and then fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingServiceManager {
    calls: Arc<Mutex<Vec<String>>>,
    units: Arc<Mutex<Vec<UnitDescriptor>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingServiceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given call (as it appears in the log) fail.
    pub fn fail_on(&self, call: impl Into<String>) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(call.into());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Descriptors passed to `install_unit`, in order.
    pub fn installed_units(&self) -> Vec<UnitDescriptor> {
        self.units.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<(), CollaboratorError> {
        let fails = self
            .failing
            .lock()
            .map_err(|_| "recording lock poisoned")?
            .contains(&call);
        self.calls
            .lock()
            .map_err(|_| "recording lock poisoned")?
            .push(call.clone());
        if fails {
            return Err(format!("{call} failed").into());
        }
        Ok(())
    }
}

impl ServiceManager for RecordingServiceManager {
    fn install_unit(&self, unit: &UnitDescriptor) -> Result<(), CollaboratorError> {
        self.units
            .lock()
            .map_err(|_| "recording lock poisoned")?
            .push(unit.clone());
        self.record(format!("install {}", unit.name()))
    }

    fn daemon_reload(&self) -> Result<(), CollaboratorError> {
        self.record("daemon-reload".to_string())
    }

    fn enable(&self, name: &str) -> Result<(), CollaboratorError> {
        self.record(format!("enable {name}"))
    }

    fn start(&self, name: &str) -> Result<(), CollaboratorError> {
        self.record(format!("start {name}"))
    }
}
