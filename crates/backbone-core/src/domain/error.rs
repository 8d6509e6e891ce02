// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid {field}: '{value}'")]
    InvalidSelection { field: &'static str, value: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSelection { field, value } => {
                let mut out = vec![format!("'{value}' is not a valid {field}")];
                let choices: Vec<&str> = match *field {
                    "database" => crate::domain::Database::ALL
                        .iter()
                        .map(|d| d.as_str())
                        .collect(),
                    "auth type" => crate::domain::AuthType::ALL
                        .iter()
                        .map(|a| a.as_str())
                        .collect(),
                    "auth feature" => crate::domain::AuthFeature::ALL
                        .iter()
                        .map(|a| a.as_str())
                        .collect(),
                    "notification provider" => crate::domain::NotificationProvider::ALL
                        .iter()
                        .map(|p| p.as_str())
                        .collect(),
                    _ => Vec::new(),
                };
                if !choices.is_empty() {
                    out.push(format!("Valid values: {}", choices.join(", ")));
                }
                out
            }
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-api, my_backend, service123".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("'{field}' must be provided"),
                "Run without -y to answer the questions interactively".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection { .. }
            | Self::InvalidProjectName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
