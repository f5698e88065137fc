//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `faasd-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory and file operations
//!   - `SecretGenerator`: credential files
//!   - `ServiceManager`: unit registration and lifecycle
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`InstallService::run`, called from the CLI layer)

pub mod output;

pub use output::{CollaboratorError, EntryKind, Filesystem, SecretGenerator, ServiceManager};

#[cfg(test)]
pub use output::{MockFilesystem, MockSecretGenerator, MockServiceManager};
