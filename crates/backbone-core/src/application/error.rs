//! Application layer errors.
//!
//! These errors represent failures in orchestration, not in the selection
//! itself. Selection problems are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while assembling a project.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Target directory present before assembly started. Nothing was touched.
    #[error("Directory already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// A template or module copy/removal failed.
    #[error("Failed to copy {path}: {reason}")]
    CopyFailure { path: PathBuf, reason: String },

    /// A generated artifact could not be written.
    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    /// The package manager failed to start or exited non-zero.
    ///
    /// Reported out of band; never aborts or rolls back an assembly.
    #[error("Dependency installation failed ({command}): {reason}")]
    InstallerFailure { command: String, reason: String },

    /// Best-effort cleanup after a failure could not remove the target.
    #[error("{original} (rollback of {path} also failed: {reason})")]
    RollbackFailed {
        path: PathBuf,
        reason: String,
        original: String,
    },

    /// No usable template root was found.
    #[error("Template directory not found (checked: {})", display_paths(.searched))]
    TemplatesNotFound { searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::CopyFailure { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the template directory is complete and readable".into(),
                "Check that you have write permissions and free disk space".into(),
            ],
            Self::WriteFailure { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::InstallerFailure { command, .. } => vec![
                format!("Ensure '{command}' is installed and in your PATH"),
                "Run the install manually inside the project directory".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("A partial project may remain at {}", path.display()),
                format!("Remove it manually: rm -rf {}", path.display()),
            ],
            Self::TemplatesNotFound { .. } => vec![
                "Point BACKBONE_TEMPLATES_DIR at the templates directory".into(),
                "Or pass --templates <DIR>".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::CopyFailure { .. }
            | Self::WriteFailure { .. }
            | Self::InstallerFailure { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::TemplatesNotFound { .. } => ErrorCategory::Configuration,
        }
    }
}
