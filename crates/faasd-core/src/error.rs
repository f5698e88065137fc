//! Unified error handling for faasd core.
//!
//! The install sequence reports exactly one error type,
//! [`InstallError`](crate::application::InstallError). This module holds what
//! every layer shares: the display category and the result alias.

pub use crate::application::InstallError;

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The host is in a state the installer refuses to work with.
    Validation,
    /// A required binary or source file is absent.
    NotFound,
    /// The supplied layout is unusable.
    Configuration,
    /// A filesystem or service-manager operation failed.
    Internal,
}

/// Convenient result type alias.
pub type InstallResult<T> = Result<T, InstallError>;
