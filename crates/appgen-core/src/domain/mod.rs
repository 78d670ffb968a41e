// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for appgen.
//!
//! This module contains pure generation logic with no I/O. Filesystem access,
//! namespace lookup and text rendering are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Observability belongs to the application and CLI layers
//! - **Immutable records**: A `SpecificationRecord` never changes once built
//! - **Pure generators**: Same record in, same source units out
//!
// Public API - what the world sees
pub mod common;
pub mod entities;
pub mod error;
pub mod generators;
pub mod source;
pub mod type_registry;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use common::{QualifiedName, RelativePath};
pub use entities::{
    DefaultValue, EmissionPlan, PlannedFile, PropertyDescriptor, PropertyKind,
    RelationCandidate, RelationDescriptor, ScalarType, SpecificationRecord,
    SpecificationRecordBuilder, TypeClassification, TypeParser,
};
pub use error::{DomainError, ErrorCategory};
pub use generators::{Artifact, generate_all};
pub use source::{SourceUnit, normalize::normalize_blank_lines};
pub use value_objects::{
    ArtifactKind, Cascade, Features, IdentifierStrategy, Modifier, PrimitiveType, RelationKind,
};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str, token: &str) -> PropertyDescriptor {
        match TypeParser::default().classify(token).unwrap() {
            TypeClassification::Scalar(ty) => PropertyDescriptor::scalar(name, token, ty, None).unwrap(),
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    fn relation(name: &str, token: &str, kind: RelationKind, on_delete: bool) -> PropertyDescriptor {
        let TypeClassification::Relation(candidate) = TypeParser::default().classify(token).unwrap()
        else {
            panic!("expected relation");
        };
        let target = QualifiedName::parse(&candidate.name).unwrap();
        let descriptor = RelationDescriptor::builder(kind, target)
            .on_delete_cascade(on_delete)
            .build();
        PropertyDescriptor::relation(name, token, candidate.nullable, descriptor).unwrap()
    }

    // ========================================================================
    // Scenario A: scalar single lookup
    // ========================================================================

    #[test]
    fn scenario_a_repository_shape() {
        let spec = SpecificationRecord::builder("App\\Model", "User")
            .property(scalar("email", "string --unique"))
            .features(Features::default())
            .single_lookup("email")
            .build()
            .unwrap();

        let artifacts = generate_all(&spec);
        let repository = artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Repository)
            .unwrap();
        let methods: Vec<_> = repository
            .unit
            .declaration
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(
            methods,
            [
                "__construct",
                "getRepository",
                "get",
                "getByEmail",
                "getAll",
                "getQueryBuilderForAll",
                "getQueryBuilderForDataGrid"
            ]
        );
        let by_email = repository.unit.declaration.method("getByEmail").unwrap();
        assert_eq!(by_email.params[0].name, "email");
        assert!(by_email
            .body
            .iter()
            .any(|l| l.contains("throw new UserNotFoundException")));
    }

    // ========================================================================
    // Scenario B: nullable many-to-one with delete cascade
    // ========================================================================

    #[test]
    fn scenario_b_many_to_one_multi_lookup() {
        let author = relation("author", "?App\\Model\\Author", RelationKind::ManyToOne, true);
        let descriptor = author.as_relation().unwrap();
        assert_eq!(descriptor.kind(), RelationKind::ManyToOne);
        assert!(descriptor.on_delete_cascade());
        assert!(!descriptor.bidirectional());
        assert_eq!(descriptor.cascade(), None);
        assert!(author.nullable());

        let spec = SpecificationRecord::builder("App\\Model", "Book")
            .property(author)
            .multi_lookup("author")
            .build()
            .unwrap();
        let repository = generators::repository::generate(&spec);
        let method = repository.declaration.method("getAllByAuthor").unwrap();
        assert_eq!(method.params[0].name, "authorId");
        assert!(method.body[0].contains("findBy(["));
    }

    // ========================================================================
    // Scenario C: to-many relations never cascade deletes
    // ========================================================================

    #[test]
    fn scenario_c_on_delete_coerced_for_to_many() {
        for kind in [RelationKind::OneToMany, RelationKind::ManyToMany] {
            let tags = relation("tags", "App\\Model\\Tag", kind, true);
            assert!(!tags.as_relation().unwrap().on_delete_cascade());
        }
    }

    // ========================================================================
    // Cross-cutting properties
    // ========================================================================

    #[test]
    fn unknown_lookup_produces_no_record() {
        let result = SpecificationRecord::builder("App\\Model", "User")
            .property(scalar("email", "string"))
            .single_lookup("phone")
            .build();
        assert_eq!(result.unwrap_err(), DomainError::UnknownProperty("phone".into()));
    }

    #[test]
    fn generation_is_idempotent() {
        let spec = SpecificationRecord::builder("App\\Model", "User")
            .property(scalar("email", "string|180 --unique"))
            .property(scalar("score", "?decimal|10,2"))
            .property(relation("team", "App\\Model\\Team", RelationKind::ManyToOne, false))
            .single_lookup("email")
            .multi_lookup("team")
            .event("all")
            .build()
            .unwrap();
        assert_eq!(generate_all(&spec), generate_all(&spec));
    }

    #[test]
    fn validator_delegates_to_records() {
        let plan = EmissionPlan::new("app");
        assert_eq!(
            DomainValidator::validate_emission_plan(&plan),
            Err(DomainError::EmptyPlan)
        );
    }
}
