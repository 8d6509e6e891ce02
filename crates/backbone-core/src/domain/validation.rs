use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// The selection source (prompts or flags) calls these before building a
/// [`FeatureSelection`](crate::domain::FeatureSelection); the pipeline itself
/// only checks that the target directory does not exist yet.
pub struct DomainValidator;

impl DomainValidator {
    /// A project name doubles as a directory name under the output directory.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("name cannot contain whitespace"));
        }
        Ok(())
    }
}
