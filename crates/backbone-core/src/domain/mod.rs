// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for BackBone.
//!
//! This module contains pure logic with no I/O. Copying templates, writing
//! artifacts and running the package manager are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Immutable entities**: `FeatureSelection` and `AssemblyPlan` never
//!   change after construction
//! - **Table driven**: what each feature contributes lives in `modules.rs`
//!   and `artifacts/blocks.rs`, not in the services

// Public API - what the world sees
pub mod artifacts;
pub mod entities;
pub mod error;
pub mod modules;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use artifacts::{
    CONSTANTS_PATH, ENV_TEMPLATE_PATH, GeneratedArtifact, render_all, render_constants,
    render_env_template,
};
pub use entities::{
    common::RelativePath,
    plan::{AssemblyPlan, DependencySet, FeatureTag, FsOperation},
    selection::{FeatureSelection, FeatureSelectionBuilder},
    template_layout::TemplateLayout,
};
pub use error::{DomainError, ErrorCategory};
pub use modules::{Gate, MODULE_REGISTRY, ModuleDef, OpDef};
pub use validation::DomainValidator;
pub use value_objects::{AuthFeature, AuthType, Database, NotificationProvider};
