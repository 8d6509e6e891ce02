//! `npm install` in a background thread.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use tracing::{error, info, instrument};

use backbone_core::application::{
    ApplicationError,
    ports::{DependencyInstaller, InstallHandle, InstallOutcome},
};

#[cfg(windows)]
const DEFAULT_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
const DEFAULT_PROGRAM: &str = "npm";

/// Append `@latest` unless the identifier already pins a version.
///
/// A leading `@` belongs to the scope (`@types/node`), not to a version.
pub fn pin_latest(package: &str) -> String {
    let unscoped = package.strip_prefix('@').unwrap_or(package);
    if unscoped.contains('@') {
        package.to_string()
    } else {
        format!("{package}@latest")
    }
}

/// Runs the package manager with inherited stdio. Output lands in the
/// user's terminal as it would for a manual install, unless silenced.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: String,
    silent: bool,
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use another npm-compatible executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            silent: false,
        }
    }

    /// Discard the package manager's own output.
    ///
    /// Used when stdout carries machine-readable output.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, reason: impl Into<String>) -> InstallOutcome {
        InstallOutcome::Failed {
            error: ApplicationError::InstallerFailure {
                command: self.program.clone(),
                reason: reason.into(),
            },
        }
    }

    fn outcome_of(&self, status: std::io::Result<ExitStatus>) -> InstallOutcome {
        match status {
            Ok(status) if status.success() => {
                info!("Dependencies installed successfully");
                InstallOutcome::Succeeded
            }
            Ok(status) => {
                error!(%status, "Dependency installation failed");
                self.failure(format!("exited with {status}"))
            }
            Err(e) => {
                error!(error = %e, "Dependency installation failed");
                self.failure(e.to_string())
            }
        }
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyInstaller for NpmInstaller {
    #[instrument(skip_all, fields(program = %self.program, target = %target_dir.display()))]
    fn install(&self, packages: &[String], target_dir: &Path) -> InstallHandle {
        let pinned: Vec<String> = packages.iter().map(|p| pin_latest(p)).collect();
        info!("Installing dependencies (latest): {}", pinned.join(" "));

        let stdio = || {
            if self.silent {
                Stdio::null()
            } else {
                Stdio::inherit()
            }
        };
        let child = Command::new(&self.program)
            .arg("install")
            .args(&pinned)
            .current_dir(target_dir)
            .stdin(Stdio::null())
            .stdout(stdio())
            .stderr(stdio())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                error!(error = %e, "Failed to start package manager");
                return InstallHandle::ready(self.failure(format!("failed to start: {e}")));
            }
        };

        let (reporter, handle) = InstallHandle::channel();
        let this = self.clone();
        let spawned = thread::Builder::new()
            .name("dependency-install".into())
            .spawn(move || reporter.report(this.outcome_of(child.wait())));

        match spawned {
            Ok(_) => handle,
            Err(e) => {
                error!(error = %e, "Failed to start install watcher");
                InstallHandle::ready(self.failure(format!("failed to watch process: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_packages_are_pinned_to_latest() {
        assert_eq!(pin_latest("mongoose"), "mongoose@latest");
        assert_eq!(pin_latest("@types/node"), "@types/node@latest");
    }

    #[test]
    fn versioned_packages_are_left_alone() {
        assert_eq!(pin_latest("mongoose@8.1.0"), "mongoose@8.1.0");
        assert_eq!(pin_latest("@types/node@20"), "@types/node@20");
    }

    #[test]
    fn missing_program_reports_failure_immediately() {
        let temp = tempfile::TempDir::new().unwrap();
        let installer = NpmInstaller::with_program("backbone-no-such-package-manager");

        let handle = installer.install(&["mongoose".into()], temp.path());

        match handle.wait() {
            InstallOutcome::Failed {
                error: ApplicationError::InstallerFailure { command, .. },
            } => assert_eq!(command, "backbone-no-such-package-manager"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let temp = tempfile::TempDir::new().unwrap();
        let handle = NpmInstaller::with_program("true").install(&["x".into()], temp.path());
        assert!(handle.wait().is_success());
    }

    #[cfg(unix)]
    #[test]
    fn silent_installer_still_reports_outcome() {
        let temp = tempfile::TempDir::new().unwrap();
        let handle = NpmInstaller::with_program("true")
            .silent(true)
            .install(&["x".into()], temp.path());
        assert!(handle.wait().is_success());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let handle = NpmInstaller::with_program("false").install(&["x".into()], temp.path());
        assert!(!handle.wait().is_success());
    }
}
