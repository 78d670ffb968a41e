//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `appgen-adapters` crate provides implementations.

use crate::domain::{QualifiedName, SourceUnit};
use crate::error::AppGenResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `appgen_adapters::filesystem::LocalFilesystem` (production)
/// - `appgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AppGenResult<()>;

    /// Write content to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, content: &str) -> AppGenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> AppGenResult<()>;
}

/// Port for turning a structural source unit into text.
///
/// Implemented by:
/// - `appgen_adapters::renderer::PhpRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait SourceRenderer: Send + Sync {
    /// Render one unit. The result does not need to be blank-line normalized.
    fn render(&self, unit: &SourceUnit) -> AppGenResult<String>;

    /// Extension of the files this renderer produces, without the dot.
    fn file_extension(&self) -> &'static str;
}

/// Port for finding the namespace of an entity referenced by short name.
///
/// Implemented by:
/// - `appgen_adapters::namespace_resolver::FilesystemNamespaceResolver`
/// - `appgen_adapters::namespace_resolver::StaticNamespaceResolver`
#[cfg_attr(test, mockall::automock)]
pub trait NamespaceResolver: Send + Sync {
    /// Resolve `Author` to e.g. `App\Model\Author\Author`.
    fn resolve(&self, short_name: &str) -> Option<QualifiedName>;
}
