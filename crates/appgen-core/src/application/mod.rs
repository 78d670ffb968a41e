//! Application layer for appgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModelService, ScaffoldService, PropertyWizard)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Input**: Model-definition DTOs
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod input;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    EmissionReport, GeneratorSettings, ModelDraft, ModelService, PropertyWizard, ScaffoldService,
    WizardInput, WizardState, WrittenFile,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, NamespaceResolver, SourceRenderer};

pub use error::ApplicationError;
pub use input::{DefaultInput, ModelInput, PropertyInput, RelationInput};
