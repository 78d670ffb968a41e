//! Model-definition loader.
//!
//! Reads a model definition from disk into a [`ModelInput`]. The format is
//! chosen by extension: `.toml` or `.json`.
//!
//! ```toml
//! namespace = "App\\Model\\User"
//! entity = "User"
//! get_by = ["email"]
//! events = ["all"]
//!
//! [[properties]]
//! name = "email"
//! type = "string|255 --unique"
//! ```

use std::fs;
use std::path::Path;

use appgen_core::{
    application::{ApplicationError, ModelInput},
    error::AppGenResult,
};
use tracing::{debug, instrument};

/// Supported definition formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDefinitionLoader;

impl ModelDefinitionLoader {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> AppGenResult<ModelInput> {
        let format =
            DefinitionFormat::from_path(path).ok_or_else(|| ApplicationError::UnsupportedInputFormat {
                path: path.to_path_buf(),
            })?;

        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::InputLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let input = self.parse(&raw, format).map_err(|reason| ApplicationError::InputLoad {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(
            entity = %input.entity,
            properties = input.properties.len(),
            "Loaded model definition"
        );
        Ok(input)
    }

    /// Parse definition text; the error is the parser's message.
    pub fn parse(&self, raw: &str, format: DefinitionFormat) -> Result<ModelInput, String> {
        match format {
            DefinitionFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
            DefinitionFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}
