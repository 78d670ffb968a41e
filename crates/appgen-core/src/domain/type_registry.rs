//! Primitive type registry.
//!
//! # Design Rationale
//!
//! Every keyword the type parser understands is described exactly once by a
//! [`PrimitiveDef`]: which primitive the generated code sees and which storage
//! type the ORM column uses. Classification is a linear table lookup.
//!
//! # Adding a New Keyword
//!
//! 1. Add one [`PrimitiveDef`] entry to [`PRIMITIVE_REGISTRY`]
//! 2. If it needs a new primitive, add a variant to `PrimitiveType`

use crate::domain::value_objects::PrimitiveType;

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveDef {
    /// Lowercase keywords that select this row.
    pub keywords: &'static [&'static str],

    /// Type seen by generated signatures.
    pub primitive: PrimitiveType,

    /// ORM column type.
    pub storage: &'static str,
}

impl PrimitiveDef {
    /// Whether a `|N` length is meaningful for this storage type.
    pub fn accepts_length(&self) -> bool {
        matches!(self.storage, "string" | "text")
    }

    /// Whether a `|P,S` precision/scale is meaningful for this storage type.
    pub fn accepts_precision(&self) -> bool {
        self.storage == "decimal"
    }
}

/// Single source of truth for primitive keywords.
pub static PRIMITIVE_REGISTRY: &[PrimitiveDef] = &[
    PrimitiveDef {
        keywords: &["string"],
        primitive: PrimitiveType::String,
        storage: "string",
    },
    PrimitiveDef {
        keywords: &["text"],
        primitive: PrimitiveType::String,
        storage: "text",
    },
    PrimitiveDef {
        keywords: &["int", "integer"],
        primitive: PrimitiveType::Int,
        storage: "integer",
    },
    PrimitiveDef {
        keywords: &["smallint"],
        primitive: PrimitiveType::Int,
        storage: "smallint",
    },
    PrimitiveDef {
        keywords: &["bigint"],
        primitive: PrimitiveType::Int,
        storage: "bigint",
    },
    PrimitiveDef {
        keywords: &["float"],
        primitive: PrimitiveType::Float,
        storage: "float",
    },
    PrimitiveDef {
        keywords: &["decimal"],
        primitive: PrimitiveType::Float,
        storage: "decimal",
    },
    PrimitiveDef {
        keywords: &["bool", "boolean"],
        primitive: PrimitiveType::Bool,
        storage: "boolean",
    },
    PrimitiveDef {
        keywords: &["datetime"],
        primitive: PrimitiveType::DateTime,
        storage: "datetime",
    },
    PrimitiveDef {
        keywords: &["date"],
        primitive: PrimitiveType::DateTime,
        storage: "date",
    },
    PrimitiveDef {
        keywords: &["time"],
        primitive: PrimitiveType::DateTime,
        storage: "time",
    },
    PrimitiveDef {
        keywords: &["datetime_immutable"],
        primitive: PrimitiveType::DateTimeImmutable,
        storage: "datetime_immutable",
    },
    PrimitiveDef {
        keywords: &["uuid"],
        primitive: PrimitiveType::Uuid,
        storage: "uuid",
    },
    PrimitiveDef {
        keywords: &["array", "json"],
        primitive: PrimitiveType::Array,
        storage: "json",
    },
];

/// Look up a keyword (case-insensitive).
pub fn find_primitive(keyword: &str) -> Option<&'static PrimitiveDef> {
    let keyword = keyword.to_ascii_lowercase();
    PRIMITIVE_REGISTRY
        .iter()
        .find(|def| def.keywords.contains(&keyword.as_str()))
}
