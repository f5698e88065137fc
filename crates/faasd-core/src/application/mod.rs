//! Application layer for the faasd installer.
//!
//! This layer contains:
//! - **Services**: the install sequence (`InstallService`) and its primitives
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: the install error taxonomy
//!
//! The application layer coordinates the domain layer and the ports; the
//! paths and unit descriptors themselves live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::InstallService;

// Re-export port traits (for adapter implementation)
pub use ports::{CollaboratorError, EntryKind, Filesystem, SecretGenerator, ServiceManager};

pub use error::InstallError;
