use crate::domain::{
    entities::{EmissionPlan, SpecificationRecord},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_specification(spec: &SpecificationRecord) -> Result<(), DomainError> {
        spec.validate()
    }

    pub fn validate_emission_plan(plan: &EmissionPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
