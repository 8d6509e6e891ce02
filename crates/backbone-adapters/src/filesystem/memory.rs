//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use backbone_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BackboneError, BackboneResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn insert_file(&mut self, path: &Path, content: String) {
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.insert(path.to_path_buf(), content);
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert_file(path.as_ref(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> BackboneResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> BackboneResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> BackboneError {
    BackboneError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn not_found(path: &Path) -> BackboneError {
    ApplicationError::CopyFailure {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> BackboneResult<()> {
        self.write()?.add_dirs(path);
        Ok(())
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> BackboneResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(not_found(from));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| {
                p.strip_prefix(from)
                    .ok()
                    .map(|rel| (to.join(rel), c.clone()))
            })
            .collect();

        for dir in dirs {
            inner.add_dirs(&dir);
        }
        for (path, content) in files {
            inner.insert_file(&path, content);
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> BackboneResult<()> {
        let mut inner = self.write()?;
        let content = inner.files.get(from).cloned().ok_or_else(|| not_found(from))?;
        inner.insert_file(to, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> BackboneResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> BackboneResult<()> {
        self.write()?.insert_file(path, content.to_string());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> BackboneResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_tree_keeps_relative_layout() {
        let fs = MemoryFilesystem::new()
            .with_file("/t/base/app.js", "app")
            .with_file("/t/base/src/routes/index.js", "routes");

        fs.copy_tree(Path::new("/t/base"), Path::new("/out/api"))
            .unwrap();

        assert_eq!(
            fs.read_file(Path::new("/out/api/src/routes/index.js")),
            Some("routes".into())
        );
        assert!(fs.exists(Path::new("/out/api/src")));
    }

    #[test]
    fn remove_dir_all_drops_everything_below() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/api/a.js", "a")
            .with_file("/out/apiary/b.js", "b");

        fs.remove_dir_all(Path::new("/out/api")).unwrap();

        assert!(!fs.exists(Path::new("/out/api")));
        assert!(fs.exists(Path::new("/out/apiary/b.js")));
    }

    #[test]
    fn copy_of_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs
            .copy_file(Path::new("/t/none.js"), Path::new("/out/none.js"))
            .is_err());
    }
}
