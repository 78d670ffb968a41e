//! Model-definition DTOs.
//!
//! The shape of a model-definition file (TOML or JSON). Loaders deserialize
//! straight into [`ModelInput`]; [`crate::application::ModelService`] turns
//! it into a validated `SpecificationRecord`.

use serde::{Deserialize, Serialize};

use crate::domain::Features;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelInput {
    /// Namespace of the generated classes, e.g. `App\Model\User`.
    pub namespace: String,
    /// Entity short name, e.g. `User`.
    pub entity: String,
    #[serde(default)]
    pub properties: Vec<PropertyInput>,
    #[serde(default)]
    pub features: Features,
    /// Properties that get a throwing `getBy<Field>` lookup.
    #[serde(default)]
    pub get_by: Vec<String>,
    /// Properties that get a `getAllBy<Field>` lookup.
    #[serde(default)]
    pub get_all_by: Vec<String>,
    /// Lifecycle events; `all` means created, updated and deleted.
    #[serde(default)]
    pub events: Vec<String>,
    /// Identifiers of configured default traits to apply.
    #[serde(default)]
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyInput {
    pub name: String,
    #[serde(rename = "type", default = "default_type")]
    pub type_expression: String,
    #[serde(default)]
    pub default: Option<DefaultInput>,
    #[serde(default)]
    pub relation: Option<RelationInput>,
}

/// A default value as written in the file. Non-string literals are accepted
/// so `default = 18` works as well as `default = "18"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultInput {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DefaultInput {
    /// The value as the wizard would have typed it.
    pub fn as_answer(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationInput {
    /// `1:1`, `M:1`, `1:M` or `N:M`.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub bidirectional: bool,
    /// `persist`, `remove` or `all`.
    #[serde(default)]
    pub cascade: Option<String>,
    #[serde(default)]
    pub on_delete_cascade: bool,
}

impl Default for RelationInput {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            bidirectional: false,
            cascade: None,
            on_delete_cascade: false,
        }
    }
}

impl PropertyInput {
    pub fn new(name: impl Into<String>, type_expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expression: type_expression.into(),
            default: None,
            relation: None,
        }
    }
}

impl ModelInput {
    pub fn new(namespace: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entity: entity.into(),
            properties: Vec::new(),
            features: Features::default(),
            get_by: Vec::new(),
            get_all_by: Vec::new(),
            events: Vec::new(),
            traits: Vec::new(),
        }
    }
}

fn default_type() -> String {
    "string".into()
}

fn default_kind() -> String {
    "M:1".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_uses_defaults() {
        let input: ModelInput = serde_json::from_str(
            r#"{
                "namespace": "App\\Model",
                "entity": "User",
                "properties": [
                    { "name": "email" },
                    { "name": "age", "type": "?int", "default": 18 },
                    { "name": "author", "type": "Author", "relation": {} }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(input.properties[0].type_expression, "string");
        assert_eq!(
            input.properties[1].default.as_ref().map(DefaultInput::as_answer),
            Some("18".into())
        );
        assert_eq!(input.properties[2].relation, Some(RelationInput::default()));
        assert_eq!(input.features, Features::default());
        assert!(input.events.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ModelInput, _> = serde_json::from_str(
            r#"{ "namespace": "App", "entity": "User", "getBy": ["email"] }"#,
        );
        assert!(result.is_err());
    }
}
