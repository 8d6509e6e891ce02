//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `backbone-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: template copies, removals and artifact writes
//!   - `DependencyInstaller`: the package manager, run in the background
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DependencyInstaller, Filesystem, InstallHandle, InstallOutcome, InstallReporter,
};

#[cfg(test)]
pub use output::{MockDependencyInstaller, MockFilesystem};
