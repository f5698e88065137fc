//! Infrastructure adapters for the faasd installer.
//!
//! This crate implements the ports defined in `faasd-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod error;
pub mod filesystem;
pub mod secrets;
pub mod systemd;

// Re-export commonly used adapters
pub use error::SystemdError;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use secrets::BasicAuthSecrets;
pub use systemd::{RecordingServiceManager, SystemdManager};
