//! Property descriptors and default values.

use std::fmt;

use crate::domain::common::{first_lower, first_upper, is_identifier};
use crate::domain::entities::relation::RelationDescriptor;
use crate::domain::entities::type_expression::ScalarType;
use crate::domain::error::DomainError;
use crate::domain::value_objects::PrimitiveType;

// ── Descriptor ───────────────────────────────────────────────────────────────

/// One property of the entity being generated.
///
/// A property is either a scalar column or a relation, never both; a default
/// value only exists on the scalar side.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    raw_expression: String,
    nullable: bool,
    kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Scalar(ScalarProperty),
    Relation(RelationDescriptor),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarProperty {
    pub ty: ScalarType,
    pub default: Option<DefaultValue>,
}

impl PropertyDescriptor {
    /// A scalar property. `default` is the raw answer; empty means none.
    pub fn scalar(
        name: impl Into<String>,
        raw_expression: impl Into<String>,
        ty: ScalarType,
        default: Option<&str>,
    ) -> Result<Self, DomainError> {
        let name = validated_name(name.into())?;
        let default = match default {
            Some(raw) => DefaultValue::parse(&name, raw, ty.primitive, ty.nullable)?,
            None => None,
        };
        Ok(Self {
            name,
            raw_expression: raw_expression.into(),
            nullable: ty.nullable,
            kind: PropertyKind::Scalar(ScalarProperty { ty, default }),
        })
    }

    pub fn relation(
        name: impl Into<String>,
        raw_expression: impl Into<String>,
        nullable: bool,
        relation: RelationDescriptor,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validated_name(name.into())?,
            raw_expression: raw_expression.into(),
            nullable,
            kind: PropertyKind::Relation(relation),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn raw_expression(&self) -> &str {
        &self.raw_expression
    }
    pub const fn nullable(&self) -> bool {
        self.nullable
    }
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn as_scalar(&self) -> Option<&ScalarProperty> {
        match &self.kind {
            PropertyKind::Scalar(s) => Some(s),
            PropertyKind::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationDescriptor> {
        match &self.kind {
            PropertyKind::Relation(r) => Some(r),
            PropertyKind::Scalar(_) => None,
        }
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        self.as_scalar().map(|s| s.ty.primitive)
    }

    pub fn storage_type(&self) -> Option<&'static str> {
        self.as_scalar().map(|s| s.ty.storage)
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.as_scalar().and_then(|s| s.default.as_ref())
    }

    pub fn is_to_many(&self) -> bool {
        self.as_relation().is_some_and(|r| r.kind().is_to_many())
    }

    /// `email` → `Email`, used in `getByEmail`.
    pub fn method_suffix(&self) -> String {
        first_upper(&self.name)
    }

    /// Lookup parameter name: `email` → `email`, relation `author` → `authorId`.
    pub fn lookup_parameter(&self) -> String {
        let base = first_lower(&self.name);
        match self.kind {
            PropertyKind::Relation(_) => format!("{base}Id"),
            PropertyKind::Scalar(_) => base,
        }
    }
}

fn validated_name(name: String) -> Result<String, DomainError> {
    if is_identifier(&name) {
        Ok(name)
    } else {
        Err(DomainError::InvalidIdentifier {
            kind: "property name",
            value: name,
        })
    }
}

// ── Default values ───────────────────────────────────────────────────────────

/// A literal default for a scalar property.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    EmptyArray,
}

impl DefaultValue {
    /// Parse a raw answer for a property of the given primitive type.
    ///
    /// An empty answer means "no default". `null` is only accepted for
    /// nullable properties. Class-typed primitives cannot have literal
    /// defaults.
    pub fn parse(
        property: &str,
        raw: &str,
        primitive: PrimitiveType,
        nullable: bool,
    ) -> Result<Option<Self>, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDefaultValue {
            property: property.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Ok(None);
        }
        if raw.trim().eq_ignore_ascii_case("null") {
            return if nullable {
                Ok(Some(Self::Null))
            } else {
                Err(invalid("null is only allowed on nullable properties"))
            };
        }

        let value = match primitive {
            PrimitiveType::String => Self::String(raw.to_string()),
            PrimitiveType::Int => Self::Int(
                raw.trim()
                    .parse()
                    .map_err(|_| invalid("expected an integer"))?,
            ),
            PrimitiveType::Float => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a number"))?;
                if !value.is_finite() {
                    return Err(invalid("expected a finite number"));
                }
                Self::Float(value)
            }
            PrimitiveType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Self::Bool(true),
                "false" => Self::Bool(false),
                _ => return Err(invalid("expected true or false")),
            },
            PrimitiveType::Array => match raw.trim() {
                "[]" => Self::EmptyArray,
                _ => return Err(invalid("only [] is supported for arrays")),
            },
            PrimitiveType::DateTime | PrimitiveType::DateTimeImmutable | PrimitiveType::Uuid => {
                return Err(invalid("object types cannot have a literal default"));
            }
        };
        Ok(Some(value))
    }

    /// Source literal for the generated code.
    pub fn literal(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(s) if s.chars().any(char::is_control) => write_double_quoted(f, s),
            Self::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => {
                let text = x.to_string();
                if text.contains(['.', 'e', 'E']) {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::EmptyArray => f.write_str("[]"),
        }
    }
}

/// PHP double-quoted literal; control characters become escape sequences so
/// the literal stays on one source line.
fn write_double_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '$' => f.write_str("\\$")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{{{:x}}}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
