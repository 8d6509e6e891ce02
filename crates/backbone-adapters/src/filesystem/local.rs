//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use backbone_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BackboneError, BackboneResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> BackboneResult<()> {
        fs::create_dir_all(path).map_err(|e| write_error(path, e, "create directory"))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> BackboneResult<()> {
        if !from.is_dir() {
            return Err(copy_error(
                from,
                io::Error::new(io::ErrorKind::NotFound, "source directory not found"),
                "copy directory",
            ));
        }

        for entry in WalkDir::new(from).min_depth(1) {
            let entry = entry.map_err(|e| copy_error(from, e.into(), "walk directory"))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| BackboneError::Internal {
                    message: format!("walked outside of {}: {}", from.display(), e),
                })?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| copy_error(&dest, e, "create directory"))?;
            } else {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| copy_error(parent, e, "create directory"))?;
                }
                trace!(from = %entry.path().display(), to = %dest.display(), "copy");
                fs::copy(entry.path(), &dest).map_err(|e| copy_error(entry.path(), e, "copy"))?;
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> BackboneResult<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| copy_error(parent, e, "create directory"))?;
        }
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| copy_error(from, e, "copy"))
    }

    fn remove_file(&self, path: &Path) -> BackboneResult<()> {
        fs::remove_file(path).map_err(|e| copy_error(path, e, "remove file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BackboneResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e, "create directory"))?;
        }
        fs::write(path, content).map_err(|e| write_error(path, e, "write file"))
    }

    fn remove_dir_all(&self, path: &Path) -> BackboneResult<()> {
        fs::remove_dir_all(path).map_err(|e| write_error(path, e, "remove directory"))
    }
}

fn copy_error(path: &Path, e: io::Error, operation: &str) -> BackboneError {
    ApplicationError::CopyFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn write_error(path: &Path, e: io::Error, operation: &str) -> BackboneError {
    ApplicationError::WriteFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_tree_merges_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.js"), "new").unwrap();
        fs::write(src.join("nested/b.js"), "b").unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("a.js"), "old").unwrap();
        fs::write(dst.join("keep.js"), "keep").unwrap();

        LocalFilesystem::new().copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.js")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.join("nested/b.js")).unwrap(), "b");
        assert_eq!(fs::read_to_string(dst.join("keep.js")).unwrap(), "keep");
    }

    #[test]
    fn copy_tree_from_missing_source_is_copy_failure() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .copy_tree(&temp.path().join("nope"), &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            BackboneError::Application(ApplicationError::CopyFailure { .. })
        ));
    }

    #[test]
    fn copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("db.js");
        fs::write(&src, "db").unwrap();
        let dst = temp.path().join("out/src/config/db.js");

        LocalFilesystem::new().copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst).unwrap(), "db");
    }

    #[test]
    fn write_file_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/.env.example");
        let fs_adapter = LocalFilesystem::new();

        fs_adapter.write_file(&path, "one").unwrap();
        fs_adapter.write_file(&path, "two").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "two");
    }

    #[test]
    fn remove_missing_file_is_copy_failure() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .remove_file(&temp.path().join("ghost.js"))
            .unwrap_err();
        assert!(matches!(
            err,
            BackboneError::Application(ApplicationError::CopyFailure { .. })
        ));
    }
}
