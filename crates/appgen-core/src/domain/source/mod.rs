//! Structural source model.
//!
//! Generators describe each artifact as a [`SourceUnit`]: a namespace, the
//! imports it needs and one class declaration whose methods carry their
//! bodies as ordered statement lines. Turning a unit into text is the job of
//! a `SourceRenderer` adapter.
//!
//! Type names in type positions (`extends`, hints, implements, traits) are
//! written fully qualified; the renderer shortens them against the unit's
//! namespace and imports. Statement lines and doc lines are emitted verbatim,
//! so any class they mention by short name must be imported or live in the
//! same namespace.

pub mod normalize;

use std::collections::BTreeSet;

use crate::domain::common::QualifiedName;

/// Type names the renderer never qualifies.
pub const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "float", "int", "iterable", "mixed", "null", "object", "self",
    "static", "string", "void",
];

pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name.to_ascii_lowercase().as_str())
}

// ── Unit ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub namespace: String,
    pub strict_types: bool,
    pub imports: BTreeSet<Import>,
    pub declaration: ClassDecl,
}

impl SourceUnit {
    pub fn new(namespace: impl Into<String>, declaration: ClassDecl) -> Self {
        Self {
            namespace: namespace.into(),
            strict_types: true,
            imports: BTreeSet::new(),
            declaration,
        }
    }

    pub fn import(&mut self, fqn: impl ToString) -> &mut Self {
        self.imports.insert(Import::new(fqn.to_string()));
        self
    }

    pub fn import_as(&mut self, fqn: impl ToString, alias: impl Into<String>) -> &mut Self {
        self.imports.insert(Import::aliased(fqn.to_string(), alias));
        self
    }

    /// Fully-qualified name of the declared class.
    pub fn class_name(&self) -> QualifiedName {
        QualifiedName::new(&self.namespace, self.declaration.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Import {
    pub name: String,
    pub alias: Option<String>,
}

impl Import {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim_start_matches('\\').to_string(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::new(name)
        }
    }

    /// The name the import makes available.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.name.rsplit('\\').next().unwrap_or(&self.name),
        }
    }
}

// ── Declarations ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassModifier {
    #[default]
    None,
    Abstract,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    pub name: String,
    pub nullable: bool,
}

impl TypeHint {
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            nullable: true,
        }
    }

    pub fn of(name: impl ToString, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDecl {
    pub name: String,
    pub modifier: ClassModifier,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub traits: Vec<String>,
    pub doc: Vec<String>,
    pub properties: Vec<PropertyDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn modifier(mut self, modifier: ClassModifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn extends(mut self, parent: impl ToString) -> Self {
        self.extends = Some(parent.to_string());
        self
    }

    pub fn doc_line(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub visibility: Visibility,
    pub type_hint: Option<TypeHint>,
    pub default: Option<String>,
    pub doc: Vec<String>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            type_hint: None,
            default: None,
            doc: Vec::new(),
        }
    }

    pub fn typed(mut self, hint: TypeHint) -> Self {
        self.type_hint = Some(hint);
        self
    }

    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    pub fn doc_line(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<TypeHint>,
    pub default: Option<String>,
    /// Constructor property promotion.
    pub promoted: Option<Visibility>,
}

impl Param {
    pub fn new(name: impl Into<String>, hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            type_hint: Some(hint),
            default: None,
            promoted: None,
        }
    }

    pub fn promoted(name: impl Into<String>, hint: TypeHint, visibility: Visibility) -> Self {
        Self {
            promoted: Some(visibility),
            ..Self::new(name, hint)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<Param>,
    pub return_type: Option<TypeHint>,
    pub doc: Vec<String>,
    pub body: Vec<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            params: Vec::new(),
            return_type: None,
            doc: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Public)
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Private)
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, hint: TypeHint) -> Self {
        self.return_type = Some(hint);
        self
    }

    pub fn doc_line(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    /// Append one statement line. An empty string is a blank line.
    pub fn line(mut self, statement: impl Into<String>) -> Self {
        self.body.push(statement.into());
        self
    }

    pub fn lines<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(statements.into_iter().map(Into::into));
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "__construct"
    }
}
