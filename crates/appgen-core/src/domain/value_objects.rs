//! Domain value objects: PrimitiveType, Modifier, RelationKind, Cascade,
//! IdentifierStrategy, Features, ArtifactKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Which
//! keywords map to which primitive lives in `type_registry.rs`; this file only
//! defines the types, their string representations and their parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PrimitiveType ────────────────────────────────────────────────────────────

/// Scalar type of a property as seen by the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    DateTimeImmutable,
    Uuid,
    Array,
}

impl PrimitiveType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime => "datetime",
            Self::DateTimeImmutable => "datetime_immutable",
            Self::Uuid => "uuid",
            Self::Array => "array",
        }
    }

    /// Type hint used in generated signatures. Class types are fully qualified.
    pub const fn type_hint(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime => "DateTime",
            Self::DateTimeImmutable => "DateTimeImmutable",
            Self::Uuid => "Ramsey\\Uuid\\UuidInterface",
            Self::Array => "array",
        }
    }

    /// Whether the type hint names a class that must be imported.
    pub const fn is_class(&self) -> bool {
        matches!(self, Self::DateTime | Self::DateTimeImmutable | Self::Uuid)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Modifier ─────────────────────────────────────────────────────────────────

/// The `|...` part of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `string|31`
    Length(u32),
    /// `decimal|10,2`
    PrecisionScale { precision: u32, scale: u32 },
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("modifier '{s}' is not numeric"))
        };
        match s.split_once(',') {
            Some((precision, scale)) => Ok(Self::PrecisionScale {
                precision: parse(precision)?,
                scale: parse(scale)?,
            }),
            None => Ok(Self::Length(parse(s)?)),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => write!(f, "{length}"),
            Self::PrecisionScale { precision, scale } => write!(f, "{precision},{scale}"),
        }
    }
}

// ── RelationKind ─────────────────────────────────────────────────────────────

/// Cardinality of a relation, seen from the entity being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    /// The short token accepted on input.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::ManyToOne => "M:1",
            Self::OneToMany => "1:M",
            Self::ManyToMany => "N:M",
        }
    }

    /// Name of the ORM mapping annotation.
    pub const fn annotation(&self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::ManyToOne => "ManyToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// Owning sides hold the foreign key and may cascade deletes in the database.
    pub const fn is_owning(&self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }

    /// The property holds a collection rather than a single entity.
    pub const fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1:1" => Ok(Self::OneToOne),
            "m:1" => Ok(Self::ManyToOne),
            "1:m" => Ok(Self::OneToMany),
            "n:m" => Ok(Self::ManyToMany),
            _ => Err(DomainError::InvalidRelationKind {
                token: s.to_string(),
            }),
        }
    }
}

// ── Cascade ──────────────────────────────────────────────────────────────────

/// ORM-level cascade applied to a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cascade {
    Persist,
    Remove,
    All,
}

impl Cascade {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Persist => "persist",
            Self::Remove => "remove",
            Self::All => "all",
        }
    }

    /// Lenient parse used for interactive answers: anything unrecognized
    /// (`no`, empty, typos) means no cascade.
    pub fn from_answer(answer: &str) -> Option<Self> {
        answer.parse().ok()
    }
}

impl fmt::Display for Cascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cascade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "persist" => Ok(Self::Persist),
            "remove" => Ok(Self::Remove),
            "all" => Ok(Self::All),
            _ => Err(DomainError::InvalidCascade {
                value: s.to_string(),
            }),
        }
    }
}

// ── IdentifierStrategy ───────────────────────────────────────────────────────

/// How entity identifiers are typed and generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierStrategy {
    /// Auto-incremented integer column.
    Integer,
    /// UUID generated by the factory, stored in the given column type.
    Uuid { column_type: String },
}

impl IdentifierStrategy {
    pub fn type_hint(&self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Uuid { .. } => PrimitiveType::Uuid.type_hint(),
        }
    }

    pub fn column_type(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Uuid { column_type } => column_type,
        }
    }

    pub fn is_uuid(&self) -> bool {
        matches!(self, Self::Uuid { .. })
    }
}

impl Default for IdentifierStrategy {
    fn default() -> Self {
        Self::Integer
    }
}

impl fmt::Display for IdentifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("int"),
            Self::Uuid { column_type } => f.write_str(column_type),
        }
    }
}

impl FromStr for IdentifierStrategy {
    type Err = DomainError;

    /// Any id type mentioning `uuid` (`uuid`, `uuid_binary`, ...) selects the
    /// UUID strategy and doubles as its column type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.contains("uuid") {
            return Ok(Self::Uuid {
                column_type: normalized,
            });
        }
        match normalized.as_str() {
            "int" | "integer" => Ok(Self::Integer),
            _ => Err(DomainError::InvalidIdStrategy(s.to_string())),
        }
    }
}

// ── Features ─────────────────────────────────────────────────────────────────

/// Optional parts of the generated artifact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Generate `<E>DataFactory` with `createFromFormData`.
    pub data_factory: bool,
    /// Generate `edit` on the entity and the facade.
    pub edit: bool,
    /// Generate `getAll` on the repository.
    pub get_all: bool,
    /// Generate `delete` on the facade.
    pub delete: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            data_factory: true,
            edit: true,
            get_all: true,
            delete: true,
        }
    }
}

impl Features {
    pub const fn none() -> Self {
        Self {
            data_factory: false,
            edit: false,
            get_all: false,
            delete: false,
        }
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// The kinds of source file generated for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Entity,
    Data,
    DataFactory,
    Factory,
    Repository,
    Facade,
    NotFound,
    Event,
}

impl ArtifactKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Data => "data",
            Self::DataFactory => "data_factory",
            Self::Factory => "factory",
            Self::Repository => "repository",
            Self::Facade => "facade",
            Self::NotFound => "not_found",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kind_tokens_are_case_insensitive() {
        assert_eq!("1:1".parse::<RelationKind>().unwrap(), RelationKind::OneToOne);
        assert_eq!("m:1".parse::<RelationKind>().unwrap(), RelationKind::ManyToOne);
        assert_eq!("M:1".parse::<RelationKind>().unwrap(), RelationKind::ManyToOne);
        assert_eq!("1:m".parse::<RelationKind>().unwrap(), RelationKind::OneToMany);
        assert_eq!("N:M".parse::<RelationKind>().unwrap(), RelationKind::ManyToMany);
    }

    #[test]
    fn relation_kind_rejects_other_tokens() {
        for token in ["", "M:N", "one-to-one", "1:2", "m1"] {
            assert!(
                matches!(
                    token.parse::<RelationKind>(),
                    Err(DomainError::InvalidRelationKind { .. })
                ),
                "accepted {token}"
            );
        }
    }

    #[test]
    fn owning_kinds() {
        assert!(RelationKind::OneToOne.is_owning());
        assert!(RelationKind::ManyToOne.is_owning());
        assert!(!RelationKind::OneToMany.is_owning());
        assert!(!RelationKind::ManyToMany.is_owning());
    }

    #[test]
    fn cascade_strict_and_lenient() {
        assert_eq!("Persist".parse::<Cascade>().unwrap(), Cascade::Persist);
        assert!("no".parse::<Cascade>().is_err());
        assert_eq!(Cascade::from_answer("no"), None);
        assert_eq!(Cascade::from_answer("all"), Some(Cascade::All));
    }

    #[test]
    fn modifier_parses_length_and_precision() {
        assert_eq!("31".parse::<Modifier>().unwrap(), Modifier::Length(31));
        assert_eq!(
            "10,2".parse::<Modifier>().unwrap(),
            Modifier::PrecisionScale {
                precision: 10,
                scale: 2
            }
        );
        assert!("abc".parse::<Modifier>().is_err());
        assert!("10,".parse::<Modifier>().is_err());
    }

    #[test]
    fn identifier_strategy_from_config_value() {
        assert_eq!(
            "int".parse::<IdentifierStrategy>().unwrap(),
            IdentifierStrategy::Integer
        );
        let uuid = "uuid_binary".parse::<IdentifierStrategy>().unwrap();
        assert!(uuid.is_uuid());
        assert_eq!(uuid.column_type(), "uuid_binary");
        assert_eq!(uuid.type_hint(), "Ramsey\\Uuid\\UuidInterface");
        assert!("serial".parse::<IdentifierStrategy>().is_err());
    }

    #[test]
    fn features_default_to_everything_and_fill_missing_keys() {
        assert!(Features::default().data_factory);
        let partial: Features = serde_json::from_str(r#"{"delete": false}"#).unwrap();
        assert!(!partial.delete);
        assert!(partial.edit && partial.get_all && partial.data_factory);
    }
}
