//! Template root discovery.
//!
//! The payload templates ship as a plain directory tree next to the binary
//! or in the working copy. [`locate_templates`] finds it.
//!
//! # Resolution order
//!
//! The first candidate holding a `base/` directory wins:
//!
//! 1. **`--templates <DIR>`** passed by the caller
//! 2. **`$BACKBONE_TEMPLATES_DIR`**
//! 3. **`templates.local_path`** from the user config
//! 4. **`./templates`** relative to the current working directory
//! 5. **`<executable-dir>/templates`** for installed binaries
//! 6. **`../templates`** for development runs from `target/debug/`
//!
//! ```env
//! BACKBONE_TEMPLATES_DIR=./templates
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use backbone_core::{application::ApplicationError, domain::TemplateLayout, error::BackboneResult};

/// Environment variable overriding the template root.
pub const TEMPLATES_DIR_ENV: &str = "BACKBONE_TEMPLATES_DIR";

/// Find the first usable template root.
#[instrument(skip_all)]
pub fn locate_templates(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> BackboneResult<TemplateLayout> {
    let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    let candidates = candidate_paths(explicit, env_dir.as_deref(), configured);

    for candidate in &candidates {
        let layout = TemplateLayout::new(candidate.clone());
        if layout.base_dir().is_dir() {
            info!(path = %candidate.display(), "Using templates");
            return Ok(layout);
        }
        debug!(path = %candidate.display(), "No base/ directory, skipping");
    }

    warn!("No templates directory found");
    Err(ApplicationError::TemplatesNotFound {
        searched: candidates,
    }
    .into())
}

/// Ordered candidate list. Pure apart from the executable lookup.
pub fn candidate_paths(
    explicit: Option<&Path>,
    env_dir: Option<&Path>,
    configured: Option<&Path>,
) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = [explicit, env_dir, configured]
        .into_iter()
        .flatten()
        .map(Path::to_path_buf)
        .collect();

    paths.push(PathBuf::from("templates"));
    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }
    paths.push(PathBuf::from("../templates"));

    paths
}

/// Return `<directory of current executable>/templates`, or `None` if the
/// executable path cannot be determined (some platforms / test runners).
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backbone_core::error::BackboneError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_env_and_config_come_first_in_order() {
        let paths = candidate_paths(
            Some(Path::new("/flag")),
            Some(Path::new("/env")),
            Some(Path::new("/config")),
        );
        assert_eq!(
            &paths[..3],
            &[
                PathBuf::from("/flag"),
                PathBuf::from("/env"),
                PathBuf::from("/config")
            ]
        );
        assert_eq!(paths.last(), Some(&PathBuf::from("../templates")));
    }

    #[test]
    fn cwd_relative_candidate_is_always_present() {
        let paths = candidate_paths(None, None, None);
        assert_eq!(paths.first(), Some(&PathBuf::from("templates")));
    }

    #[test]
    fn explicit_root_with_base_is_used() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("base")).unwrap();

        let layout = locate_templates(Some(temp.path()), None).unwrap();

        assert_eq!(layout.root(), temp.path());
    }

    #[test]
    fn root_without_base_is_skipped() {
        let empty = TempDir::new().unwrap();
        let real = TempDir::new().unwrap();
        fs::create_dir_all(real.path().join("base")).unwrap();

        let layout = locate_templates(Some(empty.path()), Some(real.path())).unwrap();

        assert_eq!(layout.root(), real.path());
    }

    #[test]
    fn not_found_lists_every_candidate() {
        let empty = TempDir::new().unwrap();
        // The workspace may have a real ./templates or ../templates; only
        // assert on the error when nothing else was picked up.
        match locate_templates(Some(empty.path()), None) {
            Err(BackboneError::Application(ApplicationError::TemplatesNotFound { searched })) => {
                assert_eq!(searched.first(), Some(&empty.path().to_path_buf()));
            }
            Ok(layout) => assert_ne!(layout.root(), empty.path()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
