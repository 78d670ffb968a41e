//! Property wizard - the question/answer flow for one property at a time,
//! as an explicit state machine.
//!
//! ```text
//! AwaitingName ──Name──▶ AwaitingType ──Type(scalar)───▶ AwaitingDefault ──Default──▶ AwaitingName
//!      │                      │
//!      │                      └──Type(relation)──▶ AwaitingRelationKind ──RelationKind──▶
//!      │                                           AwaitingRelationOptions ──RelationOptions──▶ AwaitingName
//!      └──Finish──▶ Done
//! ```
//!
//! The wizard does no I/O; the CLI asks the questions and feeds the answers
//! in. An answer that does not fit returns an error and leaves the state
//! unchanged, so the caller can ask again.

use crate::{
    application::{ApplicationError, services::ModelService},
    domain::{
        Cascade, DomainError, PropertyDescriptor, QualifiedName, RelationKind, ScalarType,
        TypeClassification, common::is_identifier,
        entities::specification::is_reserved_property_name,
    },
    error::AppGenResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    AwaitingName,
    AwaitingType {
        name: String,
    },
    AwaitingDefault {
        name: String,
        raw: String,
        ty: ScalarType,
    },
    AwaitingRelationKind {
        name: String,
        raw: String,
        nullable: bool,
        target: QualifiedName,
    },
    AwaitingRelationOptions {
        name: String,
        raw: String,
        nullable: bool,
        target: QualifiedName,
        kind: RelationKind,
    },
    Done,
}

impl WizardState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AwaitingName => "awaiting name",
            Self::AwaitingType { .. } => "awaiting type",
            Self::AwaitingDefault { .. } => "awaiting default",
            Self::AwaitingRelationKind { .. } => "awaiting relation kind",
            Self::AwaitingRelationOptions { .. } => "awaiting relation options",
            Self::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    Name(String),
    Finish,
    Type(String),
    RelationKind(String),
    RelationOptions {
        bidirectional: bool,
        cascade: Option<Cascade>,
        on_delete_cascade: bool,
    },
    /// Raw default answer; empty means none.
    Default(String),
}

pub struct PropertyWizard<'a> {
    service: &'a ModelService,
    namespace: String,
    entity: String,
    state: WizardState,
    properties: Vec<PropertyDescriptor>,
}

impl<'a> PropertyWizard<'a> {
    pub fn new(
        service: &'a ModelService,
        namespace: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            service,
            namespace: namespace.into(),
            entity: entity.into(),
            state: WizardState::AwaitingName,
            properties: Vec::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == WizardState::Done
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn into_properties(self) -> Vec<PropertyDescriptor> {
        self.properties
    }

    /// Whether the pending relation may cascade deletes, i.e. whether asking
    /// about it makes sense.
    pub fn accepts_on_delete(&self) -> bool {
        matches!(
            self.state,
            WizardState::AwaitingRelationOptions { kind, .. } if kind.is_owning()
        )
    }

    /// Feed one answer. Returns the property completed by this answer, if any.
    pub fn advance(&mut self, input: WizardInput) -> AppGenResult<Option<PropertyDescriptor>> {
        let (next, completed) = self.transition(input)?;
        self.state = next;
        if let Some(property) = &completed {
            self.properties.push(property.clone());
        }
        Ok(completed)
    }

    fn transition(
        &self,
        input: WizardInput,
    ) -> AppGenResult<(WizardState, Option<PropertyDescriptor>)> {
        match (&self.state, input) {
            (WizardState::AwaitingName, WizardInput::Finish) => Ok((WizardState::Done, None)),

            (WizardState::AwaitingName, WizardInput::Name(name)) => {
                let name = name.trim().to_string();
                if !is_identifier(&name) {
                    return Err(DomainError::InvalidIdentifier {
                        kind: "property name",
                        value: name,
                    }
                    .into());
                }
                if is_reserved_property_name(&name) {
                    return Err(DomainError::ReservedPropertyName { name }.into());
                }
                if self.properties.iter().any(|p| p.name() == name) {
                    return Err(DomainError::DuplicateProperty { name }.into());
                }
                Ok((WizardState::AwaitingType { name }, None))
            }

            (WizardState::AwaitingType { name }, WizardInput::Type(token)) => {
                let raw = token.trim().to_string();
                match self.service.classify(&raw)? {
                    TypeClassification::Scalar(ty) => Ok((
                        WizardState::AwaitingDefault {
                            name: name.clone(),
                            raw,
                            ty,
                        },
                        None,
                    )),
                    TypeClassification::Relation(candidate) => {
                        let target =
                            self.service
                                .resolve_target(&candidate, &self.namespace, &self.entity)?;
                        Ok((
                            WizardState::AwaitingRelationKind {
                                name: name.clone(),
                                raw,
                                nullable: candidate.nullable,
                                target,
                            },
                            None,
                        ))
                    }
                }
            }

            (WizardState::AwaitingDefault { name, raw, ty }, WizardInput::Default(answer)) => {
                let property =
                    PropertyDescriptor::scalar(name, raw, ty.clone(), Some(answer.as_str()))?;
                Ok((WizardState::AwaitingName, Some(property)))
            }

            (
                WizardState::AwaitingRelationKind {
                    name,
                    raw,
                    nullable,
                    target,
                },
                WizardInput::RelationKind(token),
            ) => {
                let kind: RelationKind = token.parse()?;
                Ok((
                    WizardState::AwaitingRelationOptions {
                        name: name.clone(),
                        raw: raw.clone(),
                        nullable: *nullable,
                        target: target.clone(),
                        kind,
                    },
                    None,
                ))
            }

            (
                WizardState::AwaitingRelationOptions {
                    name,
                    raw,
                    nullable,
                    target,
                    kind,
                },
                WizardInput::RelationOptions {
                    bidirectional,
                    cascade,
                    on_delete_cascade,
                },
            ) => {
                let relation = self.service.build_relation(
                    name,
                    target.clone(),
                    *kind,
                    bidirectional,
                    cascade,
                    on_delete_cascade,
                );
                let property = PropertyDescriptor::relation(name, raw, *nullable, relation)?;
                Ok((WizardState::AwaitingName, Some(property)))
            }

            (state, input) => Err(ApplicationError::ValidationFailed(format!(
                "unexpected answer {input:?} while {}",
                state.label()
            ))
            .into()),
        }
    }
}
