// ============================================================================
// domain/error.rs - MODEL SPECIFICATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the wizard keeps the last error around while re-prompting)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors (recoverable, the caller re-prompts)
    // ========================================================================
    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression { expression: String, reason: String },

    #[error("Invalid relation kind '{token}'")]
    InvalidRelationKind { token: String },

    #[error("Invalid cascade option '{value}'")]
    InvalidCascade { value: String },

    #[error("Invalid default value '{value}' for '{property}': {reason}")]
    InvalidDefaultValue {
        property: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {kind} '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Unknown identifier strategy '{0}'")]
    InvalidIdStrategy(String),

    // ========================================================================
    // Referential Errors (fatal, checked before generation)
    // ========================================================================
    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Property '{name}' is declared more than once")]
    DuplicateProperty { name: String },

    #[error("Property name '{name}' is reserved")]
    ReservedPropertyName { name: String },

    #[error("Unknown trait '{name}'")]
    UnknownTrait { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("Emission plan is empty")]
    EmptyPlan,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTypeExpression { reason, .. } => vec![
                format!("Details: {}", reason),
                "Expected: [?]type[|length] [--flag ...], e.g. ?string|31 --unique".into(),
                "Known types: string, text, int, smallint, bigint, float, decimal, bool, datetime, date, time, datetime_immutable, uuid, array, json".into(),
                "Any other name must be an existing entity".into(),
            ],
            Self::InvalidRelationKind { .. } => vec![
                "Relation kinds: 1:1, M:1, 1:M, N:M".into(),
            ],
            Self::InvalidCascade { .. } => vec![
                "Cascade options: persist, remove, all".into(),
            ],
            Self::InvalidDefaultValue { reason, .. } => vec![
                format!("Details: {}", reason),
                "Strings are written as-is, numbers and true/false must match the type".into(),
            ],
            Self::UnknownProperty(name) => vec![
                format!("'{}' is not a declared property", name),
                "Lookup fields must name properties defined on the entity".into(),
            ],
            Self::DuplicateProperty { name } => vec![
                format!("Rename or remove the second '{}' property", name),
            ],
            Self::ReservedPropertyName { name } => vec![
                format!("The entity already declares '{}' itself", name),
                "Reserved names: id, data".into(),
            ],
            Self::UnknownTrait { .. } => vec![
                "Only traits listed under model.default_traits can be selected".into(),
                "Try: appgen config list".into(),
            ],
            Self::InvalidIdStrategy(_) => vec![
                "Set model.id_type to 'int' or a uuid column type such as 'uuid_binary'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTypeExpression { .. }
            | Self::InvalidRelationKind { .. }
            | Self::InvalidCascade { .. }
            | Self::InvalidDefaultValue { .. }
            | Self::InvalidIdentifier { .. }
            | Self::DuplicateProperty { .. }
            | Self::ReservedPropertyName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownProperty(_) | Self::UnknownTrait { .. } => ErrorCategory::NotFound,
            Self::InvalidIdStrategy(_) => ErrorCategory::Configuration,
            _ => ErrorCategory::Internal,
        }
    }

    /// Whether an interactive caller should ask the same question again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTypeExpression { .. }
                | Self::InvalidRelationKind { .. }
                | Self::InvalidCascade { .. }
                | Self::InvalidDefaultValue { .. }
                | Self::InvalidIdentifier { .. }
                | Self::DuplicateProperty { .. }
                | Self::ReservedPropertyName { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}
