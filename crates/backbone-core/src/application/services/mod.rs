//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "assemble a project".

pub mod assembly_service;

pub use assembly_service::{AssemblyService, FeatureSummary};
