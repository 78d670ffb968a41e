//! appgen core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the appgen
//! model scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            appgen-cli (CLI)             │
//! │      (wizard, model files, config)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (ModelService, ScaffoldService,        │
//! │   PropertyWizard)                       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, SourceRenderer, Resolver)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     appgen-adapters (Infrastructure)    │
//! │  (LocalFilesystem, PhpRenderer, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TypeParser, SpecificationRecord,       │
//! │  generators, SourceUnit)                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appgen_core::prelude::*;
//!
//! // 1. Assemble a record from a model definition
//! let models = ModelService::new(Box::new(resolver), GeneratorSettings::default());
//! let record = models.assemble(&input)?;
//!
//! // 2. Render and write every artifact (with injected adapters)
//! let service = ScaffoldService::new(Box::new(renderer), Box::new(filesystem));
//! let report = service.scaffold(&record, "app")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EmissionReport, GeneratorSettings, ModelInput, ModelService, PropertyWizard,
        ScaffoldService, WizardInput, WizardState,
        ports::{Filesystem, NamespaceResolver, SourceRenderer},
    };
    pub use crate::domain::{
        ArtifactKind, Cascade, EmissionPlan, Features, IdentifierStrategy, PropertyDescriptor,
        QualifiedName, RelationKind, SourceUnit, SpecificationRecord,
    };
    pub use crate::error::{AppGenError, AppGenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
