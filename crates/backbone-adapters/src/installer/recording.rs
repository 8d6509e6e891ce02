use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use backbone_core::application::{
    ApplicationError,
    ports::{DependencyInstaller, InstallHandle, InstallOutcome},
};

/// One recorded `install` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCall {
    pub packages: Vec<String>,
    pub target_dir: PathBuf,
}

/// Installer that only records what it was asked to do.
///
/// Clones share the recorded calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstaller {
    calls: Arc<Mutex<Vec<InstallCall>>>,
    fail: bool,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every install as failed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl DependencyInstaller for RecordingInstaller {
    fn install(&self, packages: &[String], target_dir: &Path) -> InstallHandle {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(InstallCall {
                packages: packages.to_vec(),
                target_dir: target_dir.to_path_buf(),
            });
        }

        InstallHandle::ready(if self.fail {
            InstallOutcome::Failed {
                error: ApplicationError::InstallerFailure {
                    command: "recording".into(),
                    reason: "configured to fail".into(),
                },
            }
        } else {
            InstallOutcome::Succeeded
        })
    }
}
