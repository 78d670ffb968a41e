//! Type expression parsing and classification.
//!
//! ```text
//! type-expr := ["?"] base-name [ "|" modifier ] { " " "--" flag }
//! ```
//!
//! Classification is two-phase: the token is first split into its parts,
//! then the base name is looked up in the primitive registry. Anything that
//! is not a primitive but looks like a (qualified) identifier becomes a
//! relation candidate; resolving it to a namespace is the caller's job.

use crate::domain::common::is_qualified_identifier;
use crate::domain::error::DomainError;
use crate::domain::type_registry::{PRIMITIVE_REGISTRY, PrimitiveDef, find_primitive};
use crate::domain::value_objects::{Modifier, PrimitiveType};

/// Flags recognized when no configuration overrides them.
pub const DEFAULT_FLAGS: &[&str] = &["unique"];

// ── Parsed expression ────────────────────────────────────────────────────────

/// A type token split into its syntactic parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    pub raw: String,
    pub nullable: bool,
    pub base: String,
    /// Unparsed text after `|`.
    pub modifier: Option<String>,
    /// Recognized flags, in first-seen order, without the `--` prefix.
    pub flags: Vec<String>,
}

/// A resolved scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub primitive: PrimitiveType,
    pub storage: &'static str,
    pub nullable: bool,
    pub modifier: Option<Modifier>,
    pub flags: Vec<String>,
}

/// A base name that is not a primitive and should name an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationCandidate {
    pub name: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClassification {
    Scalar(ScalarType),
    Relation(RelationCandidate),
}

// ── Parser ───────────────────────────────────────────────────────────────────

/// Parses type tokens against a set of recognized flags.
#[derive(Debug, Clone)]
pub struct TypeParser {
    recognized_flags: Vec<String>,
}

impl Default for TypeParser {
    fn default() -> Self {
        Self::new(DEFAULT_FLAGS.iter().copied())
    }
}

impl TypeParser {
    pub fn new<I, S>(recognized_flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recognized_flags: recognized_flags
                .into_iter()
                .map(|f| f.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Split a token into nullability, base name, modifier and flags.
    ///
    /// Unknown flags are dropped. Every word after the first must be a flag.
    pub fn parse(&self, token: &str) -> Result<TypeExpression, DomainError> {
        let raw = token.trim();
        let invalid = |reason: &str| DomainError::InvalidTypeExpression {
            expression: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut words = raw.split_whitespace();
        let head = words.next().ok_or_else(|| invalid("type is empty"))?;

        let mut flags: Vec<String> = Vec::new();
        for word in words {
            let flag = word
                .strip_prefix("--")
                .filter(|f| !f.is_empty())
                .ok_or_else(|| invalid("options must be written as --flag"))?
                .to_ascii_lowercase();
            if self.recognized_flags.contains(&flag) && !flags.contains(&flag) {
                flags.push(flag);
            }
        }

        let (nullable, head) = match head.strip_prefix('?') {
            Some(rest) => (true, rest),
            None => (false, head),
        };
        let (base, modifier) = match head.split_once('|') {
            Some((base, modifier)) => (base, Some(modifier.to_string())),
            None => (head, None),
        };
        if base.is_empty() {
            return Err(invalid("type name is missing"));
        }

        Ok(TypeExpression {
            raw: raw.to_string(),
            nullable,
            base: base.to_string(),
            modifier,
            flags,
        })
    }

    /// Parse and classify a token as scalar or relation candidate.
    pub fn classify(&self, token: &str) -> Result<TypeClassification, DomainError> {
        let expr = self.parse(token)?;

        if let Some(def) = find_primitive(&expr.base) {
            return scalar(def, expr);
        }

        if is_qualified_identifier(&expr.base) {
            return Ok(TypeClassification::Relation(RelationCandidate {
                name: expr.base,
                nullable: expr.nullable,
            }));
        }

        Err(DomainError::InvalidTypeExpression {
            expression: expr.raw,
            reason: format!("'{}' is neither a known type nor an entity name", expr.base),
        })
    }
}

fn scalar(def: &'static PrimitiveDef, expr: TypeExpression) -> Result<TypeClassification, DomainError> {
    let modifier = match &expr.modifier {
        Some(text) => {
            let parsed: Modifier = text.parse().map_err(|reason: String| {
                DomainError::InvalidTypeExpression {
                    expression: expr.raw.clone(),
                    reason,
                }
            })?;
            Some(parsed)
        }
        None => None,
    };

    Ok(TypeClassification::Scalar(ScalarType {
        primitive: def.primitive,
        storage: def.storage,
        nullable: expr.nullable,
        modifier,
        flags: expr.flags,
    }))
}

impl ScalarType {
    /// Column length, when the storage type takes one.
    pub fn length(&self) -> Option<u32> {
        match (self.modifier, find_storage(self.storage)) {
            (Some(Modifier::Length(length)), Some(def)) if def.accepts_length() => Some(length),
            _ => None,
        }
    }

    /// Column precision and scale, when the storage type takes them.
    pub fn precision_scale(&self) -> Option<(u32, u32)> {
        match (self.modifier, find_storage(self.storage)) {
            (Some(Modifier::PrecisionScale { precision, scale }), Some(def))
                if def.accepts_precision() =>
            {
                Some((precision, scale))
            }
            _ => None,
        }
    }
}

fn find_storage(storage: &str) -> Option<&'static PrimitiveDef> {
    PRIMITIVE_REGISTRY
        .iter()
        .find(|def| def.storage == storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_of(token: &str) -> ScalarType {
        match TypeParser::default().classify(token).unwrap() {
            TypeClassification::Scalar(s) => s,
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn nullable_prefix_only_changes_nullability() {
        for t in ["string", "int", "uuid", "decimal|10,2", "datetime", "json"] {
            let plain = scalar_of(t);
            let nullable = scalar_of(&format!("?{t}"));
            assert!(!plain.nullable);
            assert!(nullable.nullable);
            assert_eq!(plain.primitive, nullable.primitive);
            assert_eq!(plain.storage, nullable.storage);
        }
    }

    #[test]
    fn parses_length_and_flags() {
        let s = scalar_of("?string|31 --unique");
        assert_eq!(s.primitive, PrimitiveType::String);
        assert_eq!(s.length(), Some(31));
        assert_eq!(s.flags, vec!["unique".to_string()]);
        assert!(s.nullable);
    }

    #[test]
    fn precision_only_applies_to_decimal() {
        assert_eq!(scalar_of("decimal|10,2").precision_scale(), Some((10, 2)));
        assert_eq!(scalar_of("float|10,2").precision_scale(), None);
        assert_eq!(scalar_of("int|11").length(), None);
    }

    #[test]
    fn unknown_flags_are_ignored_and_duplicates_dropped() {
        let s = scalar_of("string --indexed --unique --UNIQUE");
        assert_eq!(s.flags, vec!["unique".to_string()]);
    }

    #[test]
    fn configured_flags_are_recognized() {
        let parser = TypeParser::new(["unique", "indexed"]);
        let TypeClassification::Scalar(s) = parser.classify("string --indexed").unwrap() else {
            panic!("expected scalar");
        };
        assert_eq!(s.flags, vec!["indexed".to_string()]);
    }

    #[test]
    fn unknown_base_is_relation_candidate() {
        let parser = TypeParser::default();
        assert_eq!(
            parser.classify("?Author").unwrap(),
            TypeClassification::Relation(RelationCandidate {
                name: "Author".into(),
                nullable: true
            })
        );
        assert!(matches!(
            parser.classify("App\\Model\\Author|5 --unique").unwrap(),
            TypeClassification::Relation(RelationCandidate { ref name, nullable: false })
                if name == "App\\Model\\Author"
        ));
    }

    #[test]
    fn invalid_tokens_fail() {
        let parser = TypeParser::default();
        for token in ["", "   ", "?", "|10", "string|abc", "my-type", "string unique"] {
            assert!(
                matches!(
                    parser.classify(token),
                    Err(DomainError::InvalidTypeExpression { .. })
                ),
                "accepted {token:?}"
            );
        }
    }

    #[test]
    fn raw_expression_is_preserved() {
        let expr = TypeParser::default().parse("  ?string|31 --unique ").unwrap();
        assert_eq!(expr.raw, "?string|31 --unique");
        assert_eq!(expr.modifier.as_deref(), Some("31"));
    }
}
