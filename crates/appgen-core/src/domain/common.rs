use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Namespace separator of the generated language.
pub const NAMESPACE_SEPARATOR: char = '\\';

// ── Identifier helpers ───────────────────────────────────────────────────────

/// Uppercase the first character (`email` → `Email`).
pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character (`UserData` → `userData`).
pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// One or more identifiers joined by `\`, with an optional leading `\`.
pub fn is_qualified_identifier(s: &str) -> bool {
    let s = s.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(s);
    !s.is_empty() && s.split(NAMESPACE_SEPARATOR).all(is_identifier)
}

// ── QualifiedName ────────────────────────────────────────────────────────────

/// A fully-qualified type name split into namespace and short name.
///
/// `App\Model\User` → namespace `App\Model`, name `User`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: String,
    name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.as_ref().trim_matches(NAMESPACE_SEPARATOR).to_string(),
            name: name.into(),
        }
    }

    /// Parse `App\Model\User` (a leading `\` is accepted).
    pub fn parse(fqn: &str) -> Result<Self, DomainError> {
        if !is_qualified_identifier(fqn) {
            return Err(DomainError::InvalidIdentifier {
                kind: "type name",
                value: fqn.to_string(),
            });
        }
        let fqn = fqn.trim_start_matches(NAMESPACE_SEPARATOR);
        Ok(match fqn.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", fqn),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output location of this type below the application root.
    ///
    /// The first namespace segment is the root package and maps to the
    /// application directory itself: `App\Model\User` → `Model/User.php`.
    pub fn relative_path(&self, extension: &str) -> RelativePath {
        let mut path = PathBuf::new();
        for segment in self
            .namespace
            .split(NAMESPACE_SEPARATOR)
            .filter(|s| !s.is_empty())
            .skip(1)
        {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.name, extension));
        RelativePath::new(path)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
        }
    }
}

// ── RelativePath ─────────────────────────────────────────────────────────────

/// A filesystem path guaranteed to be **relative**.
///
/// Emission plans are resolved against the application root only when they
/// are written, so every planned path must stay relative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the provided path is absolute.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.is_absolute(),
            "RelativePath cannot be absolute: {path:?}"
        );
        Self(path)
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_upper_and_lower() {
        assert_eq!(first_upper("email"), "Email");
        assert_eq!(first_lower("UserData"), "userData");
        assert_eq!(first_upper(""), "");
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("createdAt"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(is_qualified_identifier("App\\Model\\User"));
        assert!(is_qualified_identifier("\\DateTime"));
        assert!(!is_qualified_identifier("App\\\\User"));
        assert!(!is_qualified_identifier(""));
    }

    #[test]
    fn qualified_name_parses_namespace_and_name() {
        let q = QualifiedName::parse("\\App\\Model\\Author").unwrap();
        assert_eq!(q.namespace(), "App\\Model");
        assert_eq!(q.name(), "Author");
        assert_eq!(q.to_string(), "App\\Model\\Author");

        let global = QualifiedName::parse("Exception").unwrap();
        assert_eq!(global.namespace(), "");
        assert_eq!(global.to_string(), "Exception");
    }

    #[test]
    fn relative_path_strips_root_segment() {
        let q = QualifiedName::new("App\\Model\\User", "UserRepository");
        assert_eq!(
            q.relative_path("php").as_path(),
            Path::new("Model/User/UserRepository.php")
        );

        let root_only = QualifiedName::new("App", "Kernel");
        assert_eq!(root_only.relative_path("php").as_path(), Path::new("Kernel.php"));
    }

    #[test]
    #[should_panic]
    fn relative_path_rejects_absolute() {
        RelativePath::new("/etc/passwd");
    }

}
