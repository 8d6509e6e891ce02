//! Application layer for BackBone.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AssemblyService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. What each feature contributes lives in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{AssemblyService, FeatureSummary};

pub use ports::{DependencyInstaller, Filesystem, InstallHandle, InstallOutcome, InstallReporter};

pub use error::ApplicationError;
