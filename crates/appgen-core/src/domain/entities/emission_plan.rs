use std::collections::HashSet;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::common::{QualifiedName, RelativePath};
use crate::domain::error::DomainError;
use crate::domain::value_objects::ArtifactKind;

/// Every file of one run, rendered and normalized, ready for writing.
///
/// This is the output of the generate/render phase. It contains no business
/// logic, only data. Paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct EmissionPlan {
    run_id: Uuid,
    root: PathBuf,
    files: Vec<PlannedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: RelativePath,
    pub artifact: ArtifactKind,
    pub class: QualifiedName,
    pub content: String,
}

impl EmissionPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: PlannedFile) {
        self.files.push(file);
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Absolute (root-joined) target of a planned file.
    pub fn target_of(&self, file: &PlannedFile) -> PathBuf {
        self.root.join(file.path.as_path())
    }
}
