use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem path relative to the template root or the target directory.
///
/// Only built from `&'static str` constants (the module registry and the
/// artifact destinations), so every value is known at compile time. The
/// registry tests check that none of them is absolute. Every path inside an
/// [`AssemblyPlan`](super::plan::AssemblyPlan) is one of these, resolved
/// against a root only when applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Resolve against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&'static str> for RelativePath {
    fn from(s: &'static str) -> Self {
        Self(PathBuf::from(s))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
