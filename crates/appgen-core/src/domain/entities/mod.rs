pub mod emission_plan;
pub mod property;
pub mod relation;
pub mod specification;
pub mod type_expression;

pub use crate::domain::DomainError;
pub use emission_plan::{EmissionPlan, PlannedFile};
pub use property::{DefaultValue, PropertyDescriptor, PropertyKind, ScalarProperty};
pub use relation::{RelationDescriptor, RelationDescriptorBuilder};
pub use specification::{SpecificationRecord, SpecificationRecordBuilder};
pub use type_expression::{
    RelationCandidate, ScalarType, TypeClassification, TypeExpression, TypeParser,
};
