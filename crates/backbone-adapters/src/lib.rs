//! Infrastructure adapters for BackBone.
//!
//! This crate implements the ports defined in `backbone-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod installer;
pub mod template_root;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::{InstallCall, NpmInstaller, RecordingInstaller, pin_latest};
pub use template_root::{TEMPLATES_DIR_ENV, candidate_paths, locate_templates};
