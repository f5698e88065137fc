//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the install sequence needs from the host.
//! The `faasd-adapters` crate provides implementations.

use std::io::{self, Read, Write};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::UnitDescriptor;

/// Error returned by collaborators whose failures the core only forwards.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// What occupies a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    Directory,
    /// A regular file, socket, device, ...
    Other,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `faasd_adapters::filesystem::LocalFilesystem` (production)
/// - `faasd_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Returns `io::Result` so the core can attach the path and step
/// - Handles are owned boxes; dropping them releases the underlying file
/// - `mode` is a unix permission mode, ignored where unsupported
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Inspect a path without following errors: anything that cannot be
    /// stat'ed counts as missing.
    fn entry_kind(&self, path: &Path) -> EntryKind;

    /// Create a directory and all missing parents with `mode`.
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Open an existing file for reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Create a file, or truncate it if it exists. `mode` applies on creation.
    fn create_file(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + Send>>;

    /// Move `from` over `to`, replacing it in one step.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether both paths name the same existing file (hard links and
    /// symlinks included). Missing paths are never the same file.
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// Port for populating the secrets directory.
///
/// Implemented by:
/// - `faasd_adapters::secrets::BasicAuthSecrets`
///
/// The content and number of files are opaque to the core.
#[cfg_attr(test, automock)]
pub trait SecretGenerator: Send + Sync {
    fn generate(&self, secrets_dir: &Path) -> io::Result<()>;
}

/// Port for the host service manager.
///
/// Implemented by:
/// - `faasd_adapters::systemd::SystemdManager` (production)
/// - `faasd_adapters::systemd::RecordingServiceManager` (testing)
#[cfg_attr(test, automock)]
pub trait ServiceManager: Send + Sync {
    /// Persist a unit definition for `unit`.
    fn install_unit(&self, unit: &UnitDescriptor) -> Result<(), CollaboratorError>;

    /// Make the manager re-read unit definitions.
    fn daemon_reload(&self) -> Result<(), CollaboratorError>;

    /// Mark a unit to start at boot.
    fn enable(&self, name: &str) -> Result<(), CollaboratorError>;

    /// Start a unit now.
    fn start(&self, name: &str) -> Result<(), CollaboratorError>;
}
