//! faasd Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the faasd
//! installer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            faasd-cli (CLI)              │
//! │        (`faasd install [--prepare]`)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (InstallService, fs primitives)       │
//! │       Orchestrates the sequence         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, SecretGenerator, Services) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     faasd-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemdManager, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Values)      │
//! │  (InstallLayout, UnitDescriptor, Step)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use faasd_core::{application::InstallService, domain::InstallLayout};
//!
//! let service = InstallService::new(InstallLayout::default(), filesystem, secrets, services);
//! let report = service.run(false)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InstallService,
        ports::{CollaboratorError, EntryKind, Filesystem, SecretGenerator, ServiceManager},
    };
    pub use crate::domain::{DomainError, InstallLayout, InstallReport, Step, UnitDescriptor};
    pub use crate::error::{ErrorCategory, InstallError, InstallResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
