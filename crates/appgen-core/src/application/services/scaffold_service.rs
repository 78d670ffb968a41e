//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the emission workflow:
//! 1. Validate the specification record
//! 2. Generate every artifact and render it into an in-memory plan
//! 3. Write the plan to the filesystem, rolling back new files on failure
//!
//! Nothing touches the filesystem until every artifact rendered, so a
//! rendering failure leaves no files behind.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SourceRenderer},
    },
    domain::{
        ArtifactKind, DomainValidator as validator, EmissionPlan, PlannedFile,
        SpecificationRecord, generate_all, normalize_blank_lines,
    },
    error::AppGenResult,
};

/// One file written by [`ScaffoldService::emit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub artifact: ArtifactKind,
    /// The file existed before this run and was replaced.
    pub overwritten: bool,
}

/// What a run wrote, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionReport {
    pub run_id: Uuid,
    pub files: Vec<WrittenFile>,
}

impl EmissionReport {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    renderer: Box<dyn SourceRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use appgen_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(renderer),   // impl SourceRenderer
    ///     Box::new(filesystem), // impl Filesystem
    /// );
    /// ```
    pub fn new(renderer: Box<dyn SourceRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Generate, render and write every artifact of `spec` under `app_dir`.
    pub fn scaffold(
        &self,
        spec: &SpecificationRecord,
        app_dir: impl AsRef<Path>,
    ) -> AppGenResult<EmissionReport> {
        let plan = self.plan(spec, app_dir)?;
        self.emit(&plan)
    }

    /// Render every artifact into an [`EmissionPlan`] without writing.
    #[instrument(
        skip_all,
        fields(
            entity = %spec.entity_class(),
            app_dir = %app_dir.as_ref().display()
        )
    )]
    pub fn plan(
        &self,
        spec: &SpecificationRecord,
        app_dir: impl AsRef<Path>,
    ) -> AppGenResult<EmissionPlan> {
        validator::validate_specification(spec)?;

        let mut plan = EmissionPlan::new(app_dir.as_ref());
        let extension = self.renderer.file_extension();

        for artifact in generate_all(spec) {
            let class = artifact.class();
            let text = self.renderer.render(&artifact.unit).map_err(|e| {
                ApplicationError::RenderingFailed {
                    artifact: class.to_string(),
                    reason: e.to_string(),
                }
            })?;

            debug!(artifact = %artifact.kind, class = %class, "Rendered");
            plan.add_file(PlannedFile {
                path: class.relative_path(extension),
                artifact: artifact.kind,
                class,
                content: normalize_blank_lines(&text),
            });
        }

        validator::validate_emission_plan(&plan)?;
        info!(run_id = %plan.run_id(), files = plan.file_count(), "Plan ready");
        Ok(plan)
    }

    /// Write a plan. On failure, files this run created are removed again;
    /// files that already existed stay overwritten.
    #[instrument(skip_all, fields(run_id = %plan.run_id(), root = %plan.root().display()))]
    pub fn emit(&self, plan: &EmissionPlan) -> AppGenResult<EmissionReport> {
        let preexisting: HashSet<PathBuf> = plan
            .files()
            .map(|f| plan.target_of(f))
            .filter(|p| self.filesystem.exists(p))
            .collect();

        let mut written = Vec::with_capacity(plan.file_count());
        match self.write_all(plan, &preexisting, &mut written) {
            Ok(()) => {
                info!(files = written.len(), "Scaffold completed successfully");
                Ok(EmissionReport {
                    run_id: plan.run_id(),
                    files: written,
                })
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&written);
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_all(
        &self,
        plan: &EmissionPlan,
        preexisting: &HashSet<PathBuf>,
        written: &mut Vec<WrittenFile>,
    ) -> AppGenResult<()> {
        for file in plan.files() {
            let path = plan.target_of(file);

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;

            let overwritten = preexisting.contains(&path);
            debug!(path = %path.display(), overwritten, "Wrote file");
            written.push(WrittenFile {
                path,
                artifact: file.artifact,
                overwritten,
            });
        }
        Ok(())
    }

    /// Best-effort rollback of the files this run created.
    fn rollback(&self, written: &[WrittenFile]) {
        for file in written.iter().filter(|f| !f.overwritten) {
            match self.filesystem.remove_file(&file.path) {
                Ok(()) => debug!(path = %file.path.display(), "Rolled back"),
                Err(e) => warn!(
                    error = %e,
                    path = %file.path.display(),
                    "Rollback failed"
                ),
            }
        }
    }
}
