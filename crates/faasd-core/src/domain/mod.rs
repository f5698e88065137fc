// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for the faasd installer.
//!
//! Pure values describing *what* an install produces. All I/O happens
//! behind the ports defined in the application layer.
//!
//! - **No I/O**: nothing here touches the filesystem or spawns processes
//! - **Immutable values**: layouts and descriptors are built once and cloned
//! - **No global state**: fixed paths are constants or injected configuration
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Re-exports for convenience
pub use entities::{
    layout::{
        CONFIG_FILE_MODE, CONTAINERD_SERVICE, CWD_KEY, DIR_MODE, FAASD_SERVICE,
        REQUIRED_BINARIES, SECRET_MOUNT_PATH_KEY, SECRETS_SUBDIR, SHIPPED_CONFIG_FILES,
    },
    InstallLayout, InstallReport, Step, UnitDescriptor,
};

pub use error::DomainError;
