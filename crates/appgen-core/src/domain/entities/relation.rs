//! Relation descriptors.
//!
//! Built once the type parser has classified a token as a relation and the
//! caller has resolved the candidate to a fully-qualified entity name.

use crate::domain::common::QualifiedName;
use crate::domain::value_objects::{Cascade, RelationKind};

/// How a property relates to another entity.
///
/// `on_delete_cascade` is only ever true for owning kinds (one-to-one and
/// many-to-one); the builder enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescriptor {
    kind: RelationKind,
    target: QualifiedName,
    bidirectional: bool,
    cascade: Option<Cascade>,
    on_delete_cascade: bool,
}

impl RelationDescriptor {
    pub fn builder(kind: RelationKind, target: QualifiedName) -> RelationDescriptorBuilder {
        RelationDescriptorBuilder {
            kind,
            target,
            bidirectional: false,
            cascade: None,
            on_delete_cascade: false,
        }
    }

    pub const fn kind(&self) -> RelationKind {
        self.kind
    }
    pub fn target(&self) -> &QualifiedName {
        &self.target
    }
    pub const fn bidirectional(&self) -> bool {
        self.bidirectional
    }
    pub const fn cascade(&self) -> Option<Cascade> {
        self.cascade
    }
    pub const fn on_delete_cascade(&self) -> bool {
        self.on_delete_cascade
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RelationDescriptorBuilder {
    kind: RelationKind,
    target: QualifiedName,
    bidirectional: bool,
    cascade: Option<Cascade>,
    on_delete_cascade: bool,
}

impl RelationDescriptorBuilder {
    pub fn bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    pub fn cascade(mut self, cascade: Option<Cascade>) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn on_delete_cascade(mut self, on_delete_cascade: bool) -> Self {
        self.on_delete_cascade = on_delete_cascade;
        self
    }

    /// Whether `build` will drop a requested `on_delete_cascade`.
    pub fn coerces_on_delete(&self) -> bool {
        self.on_delete_cascade && !self.kind.is_owning()
    }

    /// To-many kinds never cascade deletes at the database level; a request
    /// for it is dropped here.
    pub fn build(self) -> RelationDescriptor {
        RelationDescriptor {
            on_delete_cascade: self.on_delete_cascade && self.kind.is_owning(),
            kind: self.kind,
            target: self.target,
            bidirectional: self.bidirectional,
            cascade: self.cascade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> QualifiedName {
        QualifiedName::new("App\\Model", "Author")
    }

    #[test]
    fn owning_kinds_keep_on_delete_cascade() {
        for kind in [RelationKind::OneToOne, RelationKind::ManyToOne] {
            let builder = RelationDescriptor::builder(kind, author()).on_delete_cascade(true);
            assert!(!builder.coerces_on_delete());
            assert!(builder.build().on_delete_cascade());
        }
    }

    #[test]
    fn to_many_kinds_never_cascade_deletes() {
        for kind in [RelationKind::OneToMany, RelationKind::ManyToMany] {
            let builder = RelationDescriptor::builder(kind, author()).on_delete_cascade(true);
            assert!(builder.coerces_on_delete());
            let relation = builder.build();
            assert!(!relation.on_delete_cascade());
            assert_eq!(relation.kind(), kind);
        }
    }

    #[test]
    fn defaults() {
        let relation = RelationDescriptor::builder(RelationKind::ManyToOne, author()).build();
        assert!(!relation.bidirectional());
        assert_eq!(relation.cascade(), None);
        assert_eq!(relation.target().to_string(), "App\\Model\\Author");
    }
}
