//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "assemble a model" or "scaffold its artifacts".

pub mod model_service;
pub mod property_wizard;
pub mod scaffold_service;

pub use model_service::{GeneratorSettings, ModelDraft, ModelService};
pub use property_wizard::{PropertyWizard, WizardInput, WizardState};
pub use scaffold_service::{EmissionReport, ScaffoldService, WrittenFile};
