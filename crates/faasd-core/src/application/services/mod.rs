//! Application services - orchestrate use cases.
//!
//! `InstallService` drives the install sequence; `primitives` holds the
//! idempotent filesystem steps it is built from.

pub mod install_service;
pub mod primitives;

pub use install_service::InstallService;
pub use primitives::{copy_file, ensure_directory};
