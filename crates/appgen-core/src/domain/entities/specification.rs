//! The `SpecificationRecord` aggregate: everything the generators need to
//! know about one entity.
//!
//! Built once per invocation, validated at `build()`, then shared read-only
//! by every artifact generator.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::collections::BTreeMap;

use crate::domain::common::{
    NAMESPACE_SEPARATOR, QualifiedName, first_upper, is_identifier, is_qualified_identifier,
};
use crate::domain::entities::property::PropertyDescriptor;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{Features, IdentifierStrategy};

/// Event names the answer `all` expands to.
pub const LIFECYCLE_EVENTS: &[&str] = &["created", "updated", "deleted"];

/// Members the entity always declares: `$id`/`getId()` and `getData()`.
const RESERVED_PROPERTY_NAMES: &[&str] = &["id", "data"];

/// Whether a property would collide with a generated entity member.
/// `getData` only exists with the edit feature, but the name stays reserved
/// so toggling features never breaks a definition.
pub fn is_reserved_property_name(name: &str) -> bool {
    RESERVED_PROPERTY_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

// ── Aggregate root ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationRecord {
    namespace: String,
    entity_name: String,
    properties: Vec<PropertyDescriptor>,
    features: Features,
    single_lookup_fields: Vec<String>,
    multi_lookup_fields: Vec<String>,
    events: Vec<String>,
    traits: BTreeMap<String, QualifiedName>,
    id_strategy: IdentifierStrategy,
}

impl SpecificationRecord {
    pub fn builder(
        namespace: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> SpecificationRecordBuilder {
        SpecificationRecordBuilder::new(namespace, entity_name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
    pub const fn features(&self) -> Features {
        self.features
    }
    pub fn single_lookup_fields(&self) -> &[String] {
        &self.single_lookup_fields
    }
    pub fn multi_lookup_fields(&self) -> &[String] {
        &self.multi_lookup_fields
    }
    pub fn events(&self) -> &[String] {
        &self.events
    }
    pub fn traits(&self) -> &BTreeMap<String, QualifiedName> {
        &self.traits
    }
    pub fn id_strategy(&self) -> &IdentifierStrategy {
        &self.id_strategy
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e == name)
    }

    /// Single-lookup fields resolved to their descriptors, in declaration order
    /// of the lookup list.
    pub fn single_lookups(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.single_lookup_fields
            .iter()
            .filter_map(|name| self.property(name))
    }

    pub fn multi_lookups(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.multi_lookup_fields
            .iter()
            .filter_map(|name| self.property(name))
    }

    /// Check every cross-field invariant.
    ///
    /// Called by the builder. Available for re-validation of records that
    /// reach the generators through other paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.namespace.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "namespace" });
        }
        if !is_qualified_identifier(&self.namespace) || self.namespace.starts_with(NAMESPACE_SEPARATOR)
        {
            return Err(DomainError::InvalidIdentifier {
                kind: "namespace",
                value: self.namespace.clone(),
            });
        }
        if self.entity_name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "entity name" });
        }
        if !is_identifier(&self.entity_name) {
            return Err(DomainError::InvalidIdentifier {
                kind: "entity name",
                value: self.entity_name.clone(),
            });
        }

        for (i, property) in self.properties.iter().enumerate() {
            if is_reserved_property_name(property.name()) {
                return Err(DomainError::ReservedPropertyName {
                    name: property.name().to_string(),
                });
            }
            if self.properties[..i].iter().any(|p| p.name() == property.name()) {
                return Err(DomainError::DuplicateProperty {
                    name: property.name().to_string(),
                });
            }
        }

        for field in self
            .single_lookup_fields
            .iter()
            .chain(&self.multi_lookup_fields)
        {
            if self.property(field).is_none() {
                return Err(DomainError::UnknownProperty(field.clone()));
            }
        }

        for event in &self.events {
            if !is_identifier(event) {
                return Err(DomainError::InvalidIdentifier {
                    kind: "event name",
                    value: event.clone(),
                });
            }
        }

        Ok(())
    }

    // ── Artifact naming ──────────────────────────────────────────────────────

    fn in_namespace(&self, suffix: &str) -> QualifiedName {
        QualifiedName::new(&self.namespace, format!("{}{suffix}", self.entity_name))
    }

    pub fn entity_class(&self) -> QualifiedName {
        self.in_namespace("")
    }
    pub fn data_class(&self) -> QualifiedName {
        self.in_namespace("Data")
    }
    pub fn data_factory_class(&self) -> QualifiedName {
        self.in_namespace("DataFactory")
    }
    pub fn factory_class(&self) -> QualifiedName {
        self.in_namespace("Factory")
    }
    pub fn repository_class(&self) -> QualifiedName {
        self.in_namespace("Repository")
    }
    pub fn facade_class(&self) -> QualifiedName {
        self.in_namespace("Facade")
    }

    pub fn not_found_class(&self) -> QualifiedName {
        QualifiedName::new(
            format!("{}{NAMESPACE_SEPARATOR}Exception", self.namespace),
            format!("{}NotFoundException", self.entity_name),
        )
    }

    /// `created` → `N\Event\UserCreatedEvent`.
    pub fn event_class(&self, event: &str) -> QualifiedName {
        QualifiedName::new(
            format!("{}{NAMESPACE_SEPARATOR}Event", self.namespace),
            format!("{}{}Event", self.entity_name, first_upper(event)),
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SpecificationRecordBuilder {
    record: SpecificationRecord,
}

impl SpecificationRecordBuilder {
    pub fn new(namespace: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            record: SpecificationRecord {
                namespace: namespace
                    .into()
                    .trim()
                    .trim_matches(NAMESPACE_SEPARATOR)
                    .to_string(),
                entity_name: entity_name.into().trim().to_string(),
                properties: Vec::new(),
                features: Features::default(),
                single_lookup_fields: Vec::new(),
                multi_lookup_fields: Vec::new(),
                events: Vec::new(),
                traits: BTreeMap::new(),
                id_strategy: IdentifierStrategy::default(),
            },
        }
    }

    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.record.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = PropertyDescriptor>) -> Self {
        self.record.properties.extend(properties);
        self
    }

    pub fn features(mut self, features: Features) -> Self {
        self.record.features = features;
        self
    }

    pub fn single_lookup(mut self, field: impl Into<String>) -> Self {
        push_unique(&mut self.record.single_lookup_fields, field.into());
        self
    }

    pub fn multi_lookup(mut self, field: impl Into<String>) -> Self {
        push_unique(&mut self.record.multi_lookup_fields, field.into());
        self
    }

    /// Add an event. `all` adds created, updated and deleted; the lifecycle
    /// names match case-insensitively, any other name keeps its case.
    /// Whitespace is stripped. Duplicates are dropped; first occurrence wins
    /// the position.
    pub fn event(mut self, event: impl AsRef<str>) -> Self {
        let event: String = event.as_ref().chars().filter(|c| !c.is_whitespace()).collect();
        if event.is_empty() {
            return self;
        }
        if event.eq_ignore_ascii_case("all") {
            for e in LIFECYCLE_EVENTS {
                push_unique(&mut self.record.events, (*e).to_string());
            }
            return self;
        }
        let event = LIFECYCLE_EVENTS
            .iter()
            .find(|e| e.eq_ignore_ascii_case(&event))
            .map_or(event, |e| (*e).to_string());
        push_unique(&mut self.record.events, event);
        self
    }

    pub fn with_trait(mut self, identifier: impl Into<String>, definition: QualifiedName) -> Self {
        self.record.traits.insert(identifier.into(), definition);
        self
    }

    pub fn id_strategy(mut self, strategy: IdentifierStrategy) -> Self {
        self.record.id_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<SpecificationRecord, DomainError> {
        self.record.validate()?;
        Ok(self.record)
    }

    /// Skip validation, for exercising the checks further downstream.
    #[cfg(test)]
    pub(crate) fn build_unchecked(self) -> SpecificationRecord {
        self.record
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    let value = value.trim().to_string();
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}
