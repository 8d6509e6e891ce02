//! The assembly plan: what a run will do, computed before anything is touched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{common::RelativePath, selection::FeatureSelection},
    modules::{OpDef, active_modules},
};

/// Feature tags reported back to the caller after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureTag {
    Mongodb,
    Auth,
    NotificationsEmail,
    NotificationsSms,
}

impl FeatureTag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mongodb => "mongodb",
            Self::Auth => "auth",
            Self::NotificationsEmail => "notifications-email",
            Self::NotificationsSms => "notifications-sms",
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete file-system step with resolved relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOperation {
    CopyTree {
        from: RelativePath,
        to: RelativePath,
    },
    CopyFile {
        from: RelativePath,
        to: RelativePath,
    },
    CopyFileIfPresent {
        from: RelativePath,
        to: RelativePath,
    },
    RemoveIfPresent {
        path: RelativePath,
    },
}

impl From<&OpDef> for FsOperation {
    fn from(op: &OpDef) -> Self {
        match *op {
            OpDef::CopyTree { from, to } => Self::CopyTree {
                from: from.into(),
                to: to.into(),
            },
            OpDef::CopyFile { from, to } => Self::CopyFile {
                from: from.into(),
                to: to.into(),
            },
            OpDef::CopyFileIfPresent { from, to } => Self::CopyFileIfPresent {
                from: from.into(),
                to: to.into(),
            },
            OpDef::RemoveIfPresent { path } => Self::RemoveIfPresent { path: path.into() },
        }
    }
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyTree { from, to } => write!(f, "copy tree {from} -> ./{to}"),
            Self::CopyFile { from, to } => write!(f, "copy {from} -> {to}"),
            Self::CopyFileIfPresent { from, to } => write!(f, "copy {from} -> {to} (if present)"),
            Self::RemoveIfPresent { path } => write!(f, "remove {path} (if present)"),
        }
    }
}

/// Packages the generated project needs, in the order modules added them.
///
/// Duplicates are tolerated; order only affects how the install line reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet(Vec<String>);

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, package: impl Into<String>) {
        self.0.push(package.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.0.iter().any(|p| p == package)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of `package`, for relative-order assertions.
    pub fn position(&self, package: &str) -> Option<usize> {
        self.0.iter().position(|p| p == package)
    }
}

impl<S: Into<String>> Extend<S> for DependencySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Ordered file operations, dependencies and feature tags for one run.
///
/// Built purely from a [`FeatureSelection`]; applying it is the
/// application layer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyPlan {
    operations: Vec<FsOperation>,
    dependencies: DependencySet,
    features: Vec<FeatureTag>,
}

impl AssemblyPlan {
    /// Walk the module registry once and collect everything the active
    /// modules contribute.
    pub fn for_selection(selection: &FeatureSelection) -> Self {
        let mut plan = Self::default();

        for module in active_modules(selection) {
            plan.operations
                .extend(module.operations.iter().map(FsOperation::from));
            plan.dependencies.extend(module.dependencies.iter().copied());
            if let Some(tag) = module.tag {
                if !plan.features.contains(&tag) {
                    plan.features.push(tag);
                }
            }
        }

        plan
    }

    pub fn operations(&self) -> &[FsOperation] {
        &self.operations
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    pub fn features(&self) -> &[FeatureTag] {
        &self.features
    }
}
