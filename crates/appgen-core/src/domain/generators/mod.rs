//! Artifact generators.
//!
//! Each generator is a pure function from a validated [`SpecificationRecord`]
//! to a [`SourceUnit`]. They share naming and typing helpers from this module
//! so that every artifact agrees on class names, parameter names and types.
//!
//! # Adding a New Artifact
//!
//! 1. Add a variant to `ArtifactKind` in `value_objects.rs`
//! 2. Add a module here with a `generate` function
//! 3. Add it to [`generate_all`]

pub mod data;
pub mod data_factory;
pub mod entity;
pub mod event;
pub mod facade;
pub mod factory;
pub mod not_found;
pub mod repository;

use crate::domain::common::{QualifiedName, first_lower};
use crate::domain::entities::{PropertyDescriptor, PropertyKind, SpecificationRecord};
use crate::domain::source::{SourceUnit, TypeHint, is_builtin_type};
use crate::domain::value_objects::ArtifactKind;

pub(crate) const ORM_MAPPING: &str = "Doctrine\\ORM\\Mapping";
pub(crate) const ENTITY_MANAGER: &str = "Doctrine\\ORM\\EntityManagerInterface";
pub(crate) const QUERY_BUILDER: &str = "Doctrine\\ORM\\QueryBuilder";
pub(crate) const OBJECT_REPOSITORY: &str = "Doctrine\\Persistence\\ObjectRepository";
pub(crate) const COLLECTION: &str = "Doctrine\\Common\\Collections\\Collection";
pub(crate) const ARRAY_COLLECTION: &str = "Doctrine\\Common\\Collections\\ArrayCollection";
pub(crate) const UUID: &str = "Ramsey\\Uuid\\Uuid";
pub(crate) const EVENT_DISPATCHER: &str = "Psr\\EventDispatcher\\EventDispatcherInterface";
pub(crate) const EVENT_BASE: &str = "Symfony\\Contracts\\EventDispatcher\\Event";

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub unit: SourceUnit,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, unit: SourceUnit) -> Self {
        Self { kind, unit }
    }

    pub fn class(&self) -> QualifiedName {
        self.unit.class_name()
    }
}

/// Every artifact for the record, in emission order: entity, data, factory,
/// repository, facade, not-found error, one event per declared event, and the
/// data factory when its feature flag is set.
pub fn generate_all(spec: &SpecificationRecord) -> Vec<Artifact> {
    let mut artifacts = vec![
        Artifact::new(ArtifactKind::Entity, entity::generate(spec)),
        Artifact::new(ArtifactKind::Data, data::generate(spec)),
        Artifact::new(ArtifactKind::Factory, factory::generate(spec)),
        Artifact::new(ArtifactKind::Repository, repository::generate(spec)),
        Artifact::new(ArtifactKind::Facade, facade::generate(spec)),
        Artifact::new(ArtifactKind::NotFound, not_found::generate(spec)),
    ];

    for name in spec.events() {
        artifacts.push(Artifact::new(ArtifactKind::Event, event::generate(spec, name)));
    }

    if spec.features().data_factory {
        artifacts.push(Artifact::new(
            ArtifactKind::DataFactory,
            data_factory::generate(spec),
        ));
    }

    artifacts
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// `User` → `user`, the variable holding one entity.
pub(crate) fn entity_variable(spec: &SpecificationRecord) -> String {
    first_lower(spec.entity_name())
}

pub(crate) fn id_hint(spec: &SpecificationRecord) -> TypeHint {
    TypeHint::new(spec.id_strategy().type_hint())
}

/// The type a property has outside the entity: in the data object, getters
/// and lookup parameters. To-many relations are plain arrays there.
pub(crate) fn value_hint(property: &PropertyDescriptor) -> TypeHint {
    match property.kind() {
        PropertyKind::Scalar(s) => TypeHint::of(s.ty.primitive.type_hint(), property.nullable()),
        PropertyKind::Relation(r) if r.kind().is_to_many() => TypeHint::new("array"),
        PropertyKind::Relation(r) => TypeHint::of(r.target(), property.nullable()),
    }
}

/// Type of a lookup parameter: relations are looked up by id.
pub(crate) fn lookup_hint(spec: &SpecificationRecord, property: &PropertyDescriptor) -> TypeHint {
    match property.kind() {
        PropertyKind::Relation(_) => id_hint(spec),
        PropertyKind::Scalar(s) => TypeHint::new(s.ty.primitive.type_hint()),
    }
}

/// Import a class used by short name, unless it is a builtin or already
/// lives in the unit's namespace.
pub(crate) fn use_class(unit: &mut SourceUnit, fqn: &str) {
    let fqn = fqn.trim_start_matches('\\');
    if is_builtin_type(fqn) {
        return;
    }
    let namespace = fqn.rsplit_once('\\').map_or("", |(ns, _)| ns);
    if namespace != unit.namespace {
        unit.import(fqn);
    }
}

/// Import every class the hint names.
pub(crate) fn use_hint(unit: &mut SourceUnit, hint: &TypeHint) {
    use_class(unit, &hint.name);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_all_follows_emission_order() {
        let kinds: Vec<_> = generate_all(&fixtures::user())
            .into_iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                ArtifactKind::Entity,
                ArtifactKind::Data,
                ArtifactKind::Factory,
                ArtifactKind::Repository,
                ArtifactKind::Facade,
                ArtifactKind::NotFound,
                ArtifactKind::Event,
                ArtifactKind::Event,
                ArtifactKind::Event,
                ArtifactKind::DataFactory,
            ]
        );
    }

    #[test]
    fn data_factory_is_optional() {
        let artifacts = generate_all(&fixtures::book());
        assert!(artifacts.iter().all(|a| a.kind != ArtifactKind::DataFactory));
        assert_eq!(artifacts.len(), 6);
    }

    #[test]
    fn generation_is_deterministic() {
        let spec = fixtures::book();
        assert_eq!(generate_all(&spec), generate_all(&spec));
    }

    #[test]
    fn artifact_classes_match_record_naming() {
        let spec = fixtures::user();
        let artifacts = generate_all(&spec);
        assert_eq!(artifacts[0].class(), spec.entity_class());
        assert_eq!(artifacts[3].class(), spec.repository_class());
        assert_eq!(artifacts[5].class(), spec.not_found_class());
        assert_eq!(artifacts[6].class(), spec.event_class("created"));
    }

    #[test]
    fn use_class_skips_builtins_and_same_namespace() {
        let mut unit = SourceUnit::new(
            "App\\Model",
            crate::domain::source::ClassDecl::new("User"),
        );
        use_class(&mut unit, "int");
        use_class(&mut unit, "App\\Model\\UserData");
        use_class(&mut unit, "\\DateTime");
        use_class(&mut unit, "App\\Model\\Author\\Author");
        let names: Vec<_> = unit.imports.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["App\\Model\\Author\\Author", "DateTime"]);
    }
}
