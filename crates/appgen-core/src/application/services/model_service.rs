//! Model Service - turns raw model answers into a validated record.
//!
//! Both input paths end here: the interactive wizard hands over finished
//! property descriptors in a [`ModelDraft`], the file loader hands over a
//! [`ModelInput`]. Relation targets given by short name are resolved through
//! the `NamespaceResolver` port.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        input::{ModelInput, PropertyInput, RelationInput},
        ports::NamespaceResolver,
    },
    domain::{
        Cascade, DomainError, Features, IdentifierStrategy, PropertyDescriptor, QualifiedName,
        RelationCandidate, RelationDescriptor, RelationKind, SpecificationRecord,
        TypeClassification, TypeParser, common::NAMESPACE_SEPARATOR,
        entities::type_expression::DEFAULT_FLAGS,
    },
    error::AppGenResult,
};

/// Generator settings that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub id_strategy: IdentifierStrategy,
    /// Flags the type parser recognizes, e.g. `unique`.
    pub type_flags: Vec<String>,
    /// Trait identifier → trait type, offered for selection.
    pub default_traits: BTreeMap<String, QualifiedName>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            id_strategy: IdentifierStrategy::Integer,
            type_flags: DEFAULT_FLAGS.iter().map(|f| (*f).to_string()).collect(),
            default_traits: BTreeMap::new(),
        }
    }
}

/// Everything the wizard has collected, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDraft {
    pub namespace: String,
    pub entity: String,
    pub properties: Vec<PropertyDescriptor>,
    pub features: Features,
    pub get_by: Vec<String>,
    pub get_all_by: Vec<String>,
    pub events: Vec<String>,
    pub traits: Vec<String>,
}

impl ModelDraft {
    pub fn new(namespace: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entity: entity.into(),
            properties: Vec::new(),
            features: Features::default(),
            get_by: Vec::new(),
            get_all_by: Vec::new(),
            events: Vec::new(),
            traits: Vec::new(),
        }
    }
}

pub struct ModelService {
    resolver: Box<dyn NamespaceResolver>,
    settings: GeneratorSettings,
    parser: TypeParser,
}

impl ModelService {
    pub fn new(resolver: Box<dyn NamespaceResolver>, settings: GeneratorSettings) -> Self {
        let parser = TypeParser::new(settings.type_flags.iter().cloned());
        Self {
            resolver,
            settings,
            parser,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Classify a type token as scalar or relation candidate.
    pub fn classify(&self, token: &str) -> AppGenResult<TypeClassification> {
        Ok(self.parser.classify(token)?)
    }

    /// Resolve a relation candidate to a fully-qualified entity name.
    ///
    /// Qualified names are taken as written. A reference to the entity being
    /// generated resolves to its own namespace. Anything else is looked up.
    pub fn resolve_target(
        &self,
        candidate: &RelationCandidate,
        namespace: &str,
        entity: &str,
    ) -> AppGenResult<QualifiedName> {
        let name = candidate.name.as_str();
        if name.contains(NAMESPACE_SEPARATOR) {
            return Ok(QualifiedName::parse(name)?);
        }
        if name == entity {
            return Ok(QualifiedName::new(namespace, name));
        }
        match self.resolver.resolve(name) {
            Some(target) => {
                debug!(entity = name, target = %target, "Resolved relation target");
                Ok(target)
            }
            None => Err(DomainError::InvalidTypeExpression {
                expression: name.to_string(),
                reason: format!("no entity named '{name}' was found in the configured namespaces"),
            }
            .into()),
        }
    }

    /// Build a relation descriptor, warning when a requested delete cascade
    /// is dropped for a to-many kind.
    pub fn build_relation(
        &self,
        property: &str,
        target: QualifiedName,
        kind: RelationKind,
        bidirectional: bool,
        cascade: Option<Cascade>,
        on_delete_cascade: bool,
    ) -> RelationDescriptor {
        let builder = RelationDescriptor::builder(kind, target)
            .bidirectional(bidirectional)
            .cascade(cascade)
            .on_delete_cascade(on_delete_cascade);
        if builder.coerces_on_delete() {
            warn!(
                property,
                kind = %kind,
                "onDelete cascade is only supported on 1:1 and M:1 relations; ignoring it"
            );
        }
        builder.build()
    }

    /// Build one property from its file representation.
    pub fn build_property(
        &self,
        namespace: &str,
        entity: &str,
        input: &PropertyInput,
    ) -> AppGenResult<PropertyDescriptor> {
        let default = input.default.as_ref().map(|d| d.as_answer());

        match self.classify(&input.type_expression)? {
            TypeClassification::Scalar(ty) => {
                if input.relation.is_some() {
                    warn!(
                        property = %input.name,
                        "Relation options given for a scalar type; ignoring them"
                    );
                }
                Ok(PropertyDescriptor::scalar(
                    &input.name,
                    &input.type_expression,
                    ty,
                    default.as_deref(),
                )?)
            }
            TypeClassification::Relation(candidate) => {
                if let Some(value) = default {
                    return Err(DomainError::InvalidDefaultValue {
                        property: input.name.clone(),
                        value,
                        reason: "relations cannot have a default value".into(),
                    }
                    .into());
                }
                let target = self.resolve_target(&candidate, namespace, entity)?;
                let options = input.relation.clone().unwrap_or_default();
                let RelationInput {
                    kind,
                    bidirectional,
                    cascade,
                    on_delete_cascade,
                } = options;
                let kind: RelationKind = kind.parse()?;
                let cascade = cascade.as_deref().map(str::parse::<Cascade>).transpose()?;
                let relation = self.build_relation(
                    &input.name,
                    target,
                    kind,
                    bidirectional,
                    cascade,
                    on_delete_cascade,
                );
                Ok(PropertyDescriptor::relation(
                    &input.name,
                    &input.type_expression,
                    candidate.nullable,
                    relation,
                )?)
            }
        }
    }

    /// Assemble a record from a model-definition file.
    #[instrument(skip_all, fields(entity = %input.entity, namespace = %input.namespace))]
    pub fn assemble(&self, input: &ModelInput) -> AppGenResult<SpecificationRecord> {
        let namespace = input.namespace.trim().trim_matches(NAMESPACE_SEPARATOR);
        let entity = input.entity.trim();

        let properties = input
            .properties
            .iter()
            .map(|p| self.build_property(namespace, entity, p))
            .collect::<AppGenResult<Vec<_>>>()?;

        self.finish(ModelDraft {
            namespace: namespace.to_string(),
            entity: entity.to_string(),
            properties,
            features: input.features,
            get_by: input.get_by.clone(),
            get_all_by: input.get_all_by.clone(),
            events: input.events.clone(),
            traits: input.traits.clone(),
        })
    }

    /// Validate a draft into a record. Nothing is generated if this fails.
    #[instrument(skip_all, fields(entity = %draft.entity))]
    pub fn finish(&self, draft: ModelDraft) -> AppGenResult<SpecificationRecord> {
        let mut builder = SpecificationRecord::builder(&draft.namespace, &draft.entity)
            .properties(draft.properties)
            .features(draft.features)
            .id_strategy(self.settings.id_strategy.clone());

        for field in &draft.get_by {
            builder = builder.single_lookup(field);
        }
        for field in &draft.get_all_by {
            builder = builder.multi_lookup(field);
        }
        for event in draft.events.iter().flat_map(|e| e.split(',')) {
            builder = builder.event(event);
        }
        for requested in &draft.traits {
            let (identifier, definition) = self.find_trait(requested)?;
            builder = builder.with_trait(identifier, definition.clone());
        }

        let record = builder.build()?;
        info!(
            properties = record.properties().len(),
            events = record.events().len(),
            "Specification assembled"
        );
        Ok(record)
    }

    fn find_trait(&self, requested: &str) -> AppGenResult<(&str, &QualifiedName)> {
        let requested = requested.trim();
        self.settings
            .default_traits
            .iter()
            .find(|(identifier, _)| identifier.eq_ignore_ascii_case(requested))
            .map(|(identifier, definition)| (identifier.as_str(), definition))
            .ok_or_else(|| {
                DomainError::UnknownTrait {
                    name: requested.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::input::DefaultInput;
    use crate::application::ports::MockNamespaceResolver;
    use crate::error::AppGenError;

    fn resolver_knowing(names: &'static [(&'static str, &'static str)]) -> MockNamespaceResolver {
        let mut resolver = MockNamespaceResolver::new();
        resolver.expect_resolve().returning(move |short| {
            names
                .iter()
                .find(|(name, _)| *name == short)
                .map(|(name, ns)| QualifiedName::new(*ns, *name))
        });
        resolver
    }

    fn service() -> ModelService {
        let mut settings = GeneratorSettings::default();
        settings.default_traits.insert(
            "Timestampable".into(),
            QualifiedName::new("App\\Model\\Attribute", "Timestampable"),
        );
        ModelService::new(
            Box::new(resolver_knowing(&[("Author", "App\\Model\\Author")])),
            settings,
        )
    }

    fn relation_property(name: &str, ty: &str, relation: RelationInput) -> PropertyInput {
        PropertyInput {
            relation: Some(relation),
            ..PropertyInput::new(name, ty)
        }
    }

    #[test]
    fn short_relation_names_are_resolved() {
        let property = service()
            .build_property(
                "App\\Model\\Book",
                "Book",
                &relation_property("author", "?Author", RelationInput::default()),
            )
            .unwrap();
        let relation = property.as_relation().unwrap();
        assert_eq!(relation.target().to_string(), "App\\Model\\Author\\Author");
        assert_eq!(relation.kind(), RelationKind::ManyToOne);
        assert!(property.nullable());
    }

    #[test]
    fn self_references_use_the_entity_namespace() {
        let property = service()
            .build_property(
                "App\\Model\\Category",
                "Category",
                &relation_property("parent", "?Category", RelationInput::default()),
            )
            .unwrap();
        assert_eq!(
            property.as_relation().unwrap().target().to_string(),
            "App\\Model\\Category\\Category"
        );
    }

    #[test]
    fn unresolvable_names_are_invalid_type_expressions() {
        let err = service()
            .build_property("App\\Model", "Book", &PropertyInput::new("owner", "Owner"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppGenError::Domain(DomainError::InvalidTypeExpression { .. })
        ));
        assert!(err.is_recoverable());
    }

    #[test]
    fn to_many_on_delete_is_coerced() {
        let property = service()
            .build_property(
                "App\\Model",
                "Book",
                &relation_property(
                    "tags",
                    "App\\Model\\Tag\\Tag",
                    RelationInput {
                        kind: "N:M".into(),
                        on_delete_cascade: true,
                        ..RelationInput::default()
                    },
                ),
            )
            .unwrap();
        assert!(!property.as_relation().unwrap().on_delete_cascade());
    }

    #[test]
    fn relation_options_are_validated() {
        let bad_kind = relation_property(
            "author",
            "Author",
            RelationInput {
                kind: "many".into(),
                ..RelationInput::default()
            },
        );
        assert!(matches!(
            service().build_property("App\\Model", "Book", &bad_kind),
            Err(AppGenError::Domain(DomainError::InvalidRelationKind { .. }))
        ));

        let bad_cascade = relation_property(
            "author",
            "Author",
            RelationInput {
                cascade: Some("no".into()),
                ..RelationInput::default()
            },
        );
        assert!(matches!(
            service().build_property("App\\Model", "Book", &bad_cascade),
            Err(AppGenError::Domain(DomainError::InvalidCascade { .. }))
        ));
    }

    #[test]
    fn relations_reject_defaults() {
        let input = PropertyInput {
            default: Some(DefaultInput::Text("x".into())),
            ..PropertyInput::new("author", "Author")
        };
        assert!(matches!(
            service().build_property("App\\Model", "Book", &input),
            Err(AppGenError::Domain(DomainError::InvalidDefaultValue { .. }))
        ));
    }

    #[test]
    fn assemble_full_input() {
        let mut input = ModelInput::new("\\App\\Model\\User\\", "User");
        input.properties.push(PropertyInput::new("email", "string --unique"));
        input.get_by.push("email".into());
        input.events.push("created, deleted".into());
        input.traits.push("timestampable".into());

        let record = service().assemble(&input).unwrap();
        assert_eq!(record.namespace(), "App\\Model\\User");
        assert_eq!(record.events(), ["created", "deleted"]);
        assert!(record.traits().contains_key("Timestampable"));
        assert_eq!(record.id_strategy(), &IdentifierStrategy::Integer);
    }

    #[test]
    fn unknown_trait_fails() {
        let mut draft = ModelDraft::new("App\\Model", "User");
        draft.traits.push("SoftDeletable".into());
        assert!(matches!(
            service().finish(draft),
            Err(AppGenError::Domain(DomainError::UnknownTrait { .. }))
        ));
    }

    #[test]
    fn unknown_lookup_field_fails_before_generation() {
        let mut input = ModelInput::new("App\\Model", "User");
        input.properties.push(PropertyInput::new("email", "string"));
        input.get_all_by.push("team".into());
        assert!(matches!(
            service().assemble(&input),
            Err(AppGenError::Domain(DomainError::UnknownProperty(ref name))) if name == "team"
        ));
    }

    #[test]
    fn configured_id_strategy_is_applied() {
        let settings = GeneratorSettings {
            id_strategy: IdentifierStrategy::Uuid {
                column_type: "uuid".into(),
            },
            ..GeneratorSettings::default()
        };
        let service = ModelService::new(Box::new(resolver_knowing(&[])), settings);
        let record = service.finish(ModelDraft::new("App\\Model", "User")).unwrap();
        assert!(record.id_strategy().is_uuid());
    }
}
