//! Namespace resolvers: find the fully-qualified class of an entity that a
//! type expression names by short name only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use appgen_core::{
    application::ports::NamespaceResolver,
    domain::{QualifiedName, common::NAMESPACE_SEPARATOR},
};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Searches the application sources for `<Short>.php`.
///
/// Each configured namespace maps to a directory the same way emitted files
/// do: the first namespace segment is the application directory itself, so
/// `App\Model` is searched under `<app_dir>/Model`. Namespaces are tried in
/// order and each tree is walked sorted by file name, so the first hit is
/// deterministic.
#[derive(Debug, Clone)]
pub struct FilesystemNamespaceResolver {
    app_dir: PathBuf,
    namespaces: Vec<String>,
}

impl FilesystemNamespaceResolver {
    pub fn new<I, S>(app_dir: impl Into<PathBuf>, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            app_dir: app_dir.into(),
            namespaces: namespaces
                .into_iter()
                .map(|ns| ns.into().trim_matches(NAMESPACE_SEPARATOR).to_string())
                .filter(|ns| !ns.is_empty())
                .collect(),
        }
    }

    fn directory_of(&self, namespace: &str) -> PathBuf {
        namespace
            .split(NAMESPACE_SEPARATOR)
            .skip(1)
            .fold(self.app_dir.clone(), |dir, segment| dir.join(segment))
    }

    fn search(&self, namespace: &str, file_name: &str) -> Option<QualifiedName> {
        let root = self.directory_of(namespace);
        if !root.is_dir() {
            debug!(dir = %root.display(), "Namespace directory missing, skipping");
            return None;
        }

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != file_name {
                continue;
            }
            let short = file_name.trim_end_matches(".php");
            return Some(QualifiedName::new(
                namespace_of(namespace, &root, entry.path()),
                short,
            ));
        }
        None
    }
}

/// Namespace of a file found under `root`, which holds `namespace`.
fn namespace_of(namespace: &str, root: &Path, file: &Path) -> String {
    let mut result = namespace.to_string();
    let relative = file
        .parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));
    for segment in relative.iter() {
        result.push(NAMESPACE_SEPARATOR);
        result.push_str(&segment.to_string_lossy());
    }
    result
}

impl NamespaceResolver for FilesystemNamespaceResolver {
    #[instrument(skip(self), fields(app_dir = %self.app_dir.display()))]
    fn resolve(&self, short_name: &str) -> Option<QualifiedName> {
        let file_name = format!("{short_name}.php");
        let found = self
            .namespaces
            .iter()
            .find_map(|namespace| self.search(namespace, &file_name));

        match &found {
            Some(name) => debug!(resolved = %name, "Resolved entity"),
            None => debug!("Entity not found in any namespace"),
        }
        found
    }
}

/// Resolver backed by a fixed table of known entities.
#[derive(Debug, Clone, Default)]
pub struct StaticNamespaceResolver {
    entities: BTreeMap<String, QualifiedName>,
}

impl StaticNamespaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its short name.
    pub fn register(&mut self, name: QualifiedName) -> &mut Self {
        self.entities.insert(name.name().to_string(), name);
        self
    }

    pub fn with(mut self, name: QualifiedName) -> Self {
        self.register(name);
        self
    }
}

impl NamespaceResolver for StaticNamespaceResolver {
    fn resolve(&self, short_name: &str) -> Option<QualifiedName> {
        self.entities.get(short_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<?php\n").unwrap();
    }

    #[test]
    fn finds_entity_in_nested_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Model/Author/Author.php");
        touch(temp.path(), "Model/Author/AuthorData.php");

        let resolver = FilesystemNamespaceResolver::new(temp.path(), ["App\\Model"]);
        let found = resolver.resolve("Author").unwrap();
        assert_eq!(found.to_string(), "App\\Model\\Author\\Author");
        assert!(resolver.resolve("Publisher").is_none());
    }

    #[test]
    fn namespaces_are_tried_in_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Model/Tag/Tag.php");
        touch(temp.path(), "Legacy/Tag.php");

        let resolver =
            FilesystemNamespaceResolver::new(temp.path(), ["\\App\\Legacy\\", "App\\Model"]);
        assert_eq!(resolver.resolve("Tag").unwrap().to_string(), "App\\Legacy\\Tag");
    }

    #[test]
    fn missing_directories_resolve_nothing() {
        let temp = TempDir::new().unwrap();
        let resolver = FilesystemNamespaceResolver::new(temp.path().join("nope"), ["App\\Model"]);
        assert!(resolver.resolve("User").is_none());
    }

    #[test]
    fn static_resolver_looks_up_short_names() {
        let resolver = StaticNamespaceResolver::new()
            .with(QualifiedName::new("App\\Model\\Author", "Author"));
        assert_eq!(
            resolver.resolve("Author").map(|n| n.to_string()).as_deref(),
            Some("App\\Model\\Author\\Author")
        );
        assert!(resolver.resolve("author").is_none());
    }
}
