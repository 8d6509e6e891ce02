//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the assembly pipeline needs from external
//! systems. The `backbone-adapters` crate provides implementations.

mod install;

pub use install::{InstallHandle, InstallOutcome, InstallReporter};

use std::path::Path;

use crate::error::BackboneResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `backbone_adapters::filesystem::LocalFilesystem` (production)
/// - `backbone_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute by the time they reach this port; the service joins
/// every `RelativePath` onto either the template root or the target root.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BackboneResult<()>;

    /// Recursively copy `from` into `to`, merging with and overwriting
    /// whatever `to` already holds.
    fn copy_tree(&self, from: &Path, to: &Path) -> BackboneResult<()>;

    /// Copy a single file, creating parent directories of `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> BackboneResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> BackboneResult<()>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> BackboneResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> BackboneResult<()>;
}

/// Port for the package manager.
///
/// Implemented by:
/// - `backbone_adapters::installer::NpmInstaller` (production)
/// - `backbone_adapters::installer::RecordingInstaller` (testing)
///
/// `install` must return immediately. The work runs in the background and
/// its end is observed through the returned [`InstallHandle`].
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    /// Start installing `packages` inside `target_dir`.
    fn install(&self, packages: &[String], target_dir: &Path) -> InstallHandle;
}
