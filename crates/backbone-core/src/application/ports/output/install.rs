use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::application::ApplicationError;

/// How a background install ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded,
    Failed { error: ApplicationError },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Sending half, owned by whoever runs the install.
#[derive(Debug)]
pub struct InstallReporter {
    tx: Sender<InstallOutcome>,
}

impl InstallReporter {
    /// Report the outcome. A caller that dropped its handle is not an error.
    pub fn report(self, outcome: InstallOutcome) {
        let _ = self.tx.send(outcome);
    }
}

/// Observable handle to an install started by a [`DependencyInstaller`].
///
/// Dropping the handle does not cancel the install.
///
/// [`DependencyInstaller`]: super::DependencyInstaller
#[derive(Debug)]
pub struct InstallHandle {
    rx: Receiver<InstallOutcome>,
}

impl InstallHandle {
    /// Create a connected reporter/handle pair.
    pub fn channel() -> (InstallReporter, InstallHandle) {
        let (tx, rx) = mpsc::channel();
        (InstallReporter { tx }, InstallHandle { rx })
    }

    /// A handle whose outcome is already known.
    pub fn ready(outcome: InstallOutcome) -> Self {
        let (reporter, handle) = Self::channel();
        reporter.report(outcome);
        handle
    }

    /// Non-blocking check. `None` while the install is still running.
    pub fn try_outcome(&self) -> Option<InstallOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Self::abandoned()),
        }
    }

    /// Block until the install ends.
    pub fn wait(self) -> InstallOutcome {
        self.rx.recv().unwrap_or_else(|_| Self::abandoned())
    }

    /// Block for at most `timeout`. `None` if the install is still running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<InstallOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Self::abandoned()),
        }
    }

    fn abandoned() -> InstallOutcome {
        InstallOutcome::Failed {
            error: ApplicationError::InstallerFailure {
                command: "install".into(),
                reason: "installer stopped without reporting an outcome".into(),
            },
        }
    }
}
