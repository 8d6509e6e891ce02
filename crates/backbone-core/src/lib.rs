//! BackBone Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the BackBone
//! backend assembler, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          backbone-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (AssemblyService)            │
//! │   plan, apply, install, write, rollback │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Filesystem, DependencyInstaller)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    backbone-adapters (Infrastructure)   │
//! │   (LocalFilesystem, NpmInstaller, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (FeatureSelection, AssemblyPlan, env &  │
//! │  constants generators, module table)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use backbone_core::{
//!     application::AssemblyService,
//!     domain::{AuthType, FeatureSelection, TemplateLayout},
//! };
//!
//! // 1. Describe the project
//! let selection = FeatureSelection::builder()
//!     .project_name("my-api")
//!     .auth_type(AuthType::Jwt)
//!     .build()
//!     .unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = AssemblyService::new(filesystem, installer, TemplateLayout::new("templates"));
//! let summary = service.assemble(&selection, ".").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AssemblyService, FeatureSummary,
        ports::{DependencyInstaller, Filesystem, InstallHandle, InstallOutcome, InstallReporter},
    };
    pub use crate::domain::{
        AssemblyPlan, AuthFeature, AuthType, Database, DependencySet, FeatureSelection,
        FeatureSelectionBuilder, FeatureTag, NotificationProvider, TemplateLayout,
        render_constants, render_env_template,
    };
    pub use crate::error::{BackboneError, BackboneResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
