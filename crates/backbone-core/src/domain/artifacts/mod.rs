//! Content generators for the two derived configuration files.
//!
//! Pure functions of a [`FeatureSelection`]: no I/O, no clock, no
//! environment reads. The same selection always renders byte-identical text.

pub mod blocks;
mod constants;
mod env;

pub use constants::render_constants;
pub use env::render_env_template;

use crate::domain::{FeatureSelection, RelativePath};

/// Path of the env template inside the generated project.
pub const ENV_TEMPLATE_PATH: &str = ".env.example";

/// Path of the constants module inside the generated project.
pub const CONSTANTS_PATH: &str = "src/config/constants.js";

/// Rendered artifact with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: RelativePath,
    pub content: String,
}

/// Render both artifacts in write order: env template, then constants.
pub fn render_all(selection: &FeatureSelection) -> [GeneratedArtifact; 2] {
    [
        GeneratedArtifact {
            path: ENV_TEMPLATE_PATH.into(),
            content: render_env_template(selection),
        },
        GeneratedArtifact {
            path: CONSTANTS_PATH.into(),
            content: render_constants(selection),
        },
    ]
}
