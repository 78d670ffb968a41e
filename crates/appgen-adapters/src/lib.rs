//! Infrastructure adapters for appgen.
//!
//! This crate implements the ports defined in `appgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod model_loader;
pub mod namespace_resolver;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use model_loader::{DefinitionFormat, ModelDefinitionLoader};
pub use namespace_resolver::{FilesystemNamespaceResolver, StaticNamespaceResolver};
pub use renderer::PhpRenderer;
