//! Assembly Service - the main application orchestrator.
//!
//! One call turns a [`FeatureSelection`] into a project directory:
//! 1. Refuse to touch an existing target
//! 2. Build the [`AssemblyPlan`] and apply its file-system operations
//! 3. Start the dependency install in the background
//! 4. Write the generated artifacts
//!
//! Any failure in steps 2 or 4 removes the target directory before the error
//! is returned. The install never fails the assembly.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{DependencyInstaller, Filesystem, InstallHandle},
    },
    domain::{
        AssemblyPlan, DependencySet, FeatureSelection, FeatureTag, FsOperation, TemplateLayout,
        render_all,
    },
    error::{BackboneError, BackboneResult},
};

/// What an assembly produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    pub project_name: String,
    pub target_dir: PathBuf,
    pub features: Vec<FeatureTag>,
    pub dependencies: DependencySet,
    pub install_started: bool,
    #[serde(skip)]
    install: Option<InstallHandle>,
}

impl FeatureSummary {
    /// Take the handle of the background install, if one was started.
    pub fn take_install(&mut self) -> Option<InstallHandle> {
        self.install.take()
    }
}

/// Main assembly service.
pub struct AssemblyService {
    filesystem: Box<dyn Filesystem>,
    installer: Box<dyn DependencyInstaller>,
    layout: TemplateLayout,
    install: bool,
}

impl AssemblyService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        installer: Box<dyn DependencyInstaller>,
        layout: TemplateLayout,
    ) -> Self {
        Self {
            filesystem,
            installer,
            layout,
            install: true,
        }
    }

    /// Skip the dependency install step.
    pub fn without_install(mut self) -> Self {
        self.install = false;
        self
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Assemble `selection` into `output_dir/<project_name>`.
    #[instrument(
        skip_all,
        fields(
            project = %selection.project_name(),
            output_dir = %output_dir.as_ref().display(),
            run_id = %Uuid::new_v4()
        )
    )]
    pub fn assemble(
        &self,
        selection: &FeatureSelection,
        output_dir: impl AsRef<Path>,
    ) -> BackboneResult<FeatureSummary> {
        let target = output_dir.as_ref().join(selection.project_name());

        if self.filesystem.exists(&target) {
            return Err(ApplicationError::AlreadyExists { path: target }.into());
        }

        let plan = AssemblyPlan::for_selection(selection);
        info!(
            operations = plan.operations().len(),
            dependencies = plan.dependencies().len(),
            "Assembly planned"
        );

        let install = match self.materialize(&plan, selection, &target) {
            Ok(install) => install,
            Err(e) => return Err(self.rollback(&target, e)),
        };

        info!(features = ?plan.features(), "Assembly completed");

        Ok(FeatureSummary {
            project_name: selection.project_name().to_string(),
            target_dir: target,
            features: plan.features().to_vec(),
            dependencies: plan.dependencies().clone(),
            install_started: install.is_some(),
            install,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn materialize(
        &self,
        plan: &AssemblyPlan,
        selection: &FeatureSelection,
        target: &Path,
    ) -> BackboneResult<Option<InstallHandle>> {
        self.filesystem.create_dir_all(target)?;
        self.apply(plan, target)?;

        let install = self.start_install(plan.dependencies(), target);

        if let Err(e) = self.write_artifacts(selection, target) {
            // The installer writes into the target; let it exit before rollback.
            if let Some(handle) = install {
                warn!("Waiting for the running install before rolling back");
                let outcome = handle.wait();
                debug!(success = outcome.is_success(), "Install ended");
            }
            return Err(e);
        }

        Ok(install)
    }

    fn write_artifacts(&self, selection: &FeatureSelection, target: &Path) -> BackboneResult<()> {
        for artifact in render_all(selection) {
            let path = artifact.path.under(target);
            debug!(path = %path.display(), "Writing artifact");
            self.filesystem.write_file(&path, &artifact.content)?;
        }
        Ok(())
    }

    /// Run every planned operation in order, stopping at the first failure.
    #[instrument(skip_all, fields(target = %target.display()))]
    fn apply(&self, plan: &AssemblyPlan, target: &Path) -> BackboneResult<()> {
        for op in plan.operations() {
            debug!(%op, "Applying");
            match op {
                FsOperation::CopyTree { from, to } => {
                    self.filesystem
                        .copy_tree(&self.layout.resolve(from), &to.under(target))?;
                }
                FsOperation::CopyFile { from, to } => {
                    self.filesystem
                        .copy_file(&self.layout.resolve(from), &to.under(target))?;
                }
                FsOperation::CopyFileIfPresent { from, to } => {
                    let source = self.layout.resolve(from);
                    if self.filesystem.exists(&source) {
                        self.filesystem.copy_file(&source, &to.under(target))?;
                    } else {
                        debug!(source = %source.display(), "Source absent, skipped");
                    }
                }
                FsOperation::RemoveIfPresent { path } => {
                    let path = path.under(target);
                    if self.filesystem.exists(&path) {
                        self.filesystem.remove_file(&path)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn start_install(&self, dependencies: &DependencySet, target: &Path) -> Option<InstallHandle> {
        if !self.install {
            info!("Dependency installation disabled");
            return None;
        }
        if dependencies.is_empty() {
            return None;
        }
        Some(self.installer.install(dependencies.as_slice(), target))
    }

    /// Best-effort removal of a partially assembled target.
    fn rollback(&self, target: &Path, original: BackboneError) -> BackboneError {
        warn!(error = %original, "Assembly failed, attempting rollback");

        if !self.filesystem.exists(target) {
            return original;
        }

        match self.filesystem.remove_dir_all(target) {
            Ok(()) => {
                info!(path = %target.display(), "Rollback successful");
                original
            }
            Err(e) => {
                warn!(error = %e, path = %target.display(), "Rollback failed");
                ApplicationError::RollbackFailed {
                    path: target.to_path_buf(),
                    reason: e.to_string(),
                    original: original.to_string(),
                }
                .into()
            }
        }
    }
}
