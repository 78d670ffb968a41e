//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`GeneratorSettings`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `APPGEN_*` environment variables, `__` between nested keys
//!    (`APPGEN_MODEL__ID_TYPE=uuid`)
//! 3. Config file: `--config FILE`, else `.appgen.toml` in the working
//!    directory, else the platform config directory
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use appgen_core::{
    application::GeneratorSettings,
    domain::{IdentifierStrategy, QualifiedName},
};

use crate::error::{CliError, CliResult};

/// Project-local config file name.
pub const LOCAL_CONFIG: &str = ".appgen.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source directory generated files are written under.
    pub app_dir: PathBuf,
    /// Generator settings.
    pub model: ModelConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// `int`, or any type containing `uuid` (`uuid`, `uuid_binary`, ...).
    pub id_type: String,
    /// Namespaces searched when a relation names an entity by short name.
    pub namespaces: Vec<String>,
    /// Flags accepted after `--` in a type expression.
    pub type_flags: Vec<String>,
    /// Trait identifier → fully-qualified trait name.
    pub default_traits: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_dir: PathBuf::from("app"),
            model: ModelConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id_type: "int".into(),
            namespaces: vec!["App\\Model".into()],
            type_flags: vec!["unique".into()],
            default_traits: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. The
    /// implicit locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default config")?;

        let mut builder = Config::builder().add_source(defaults);
        match Self::active_path(config_file) {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(config_file.is_some()),
                );
            }
            None => debug!("No config file found, using defaults"),
        }

        let config = builder
            .add_source(
                Environment::with_prefix("APPGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("model.namespaces")
                    .with_list_parse_key("model.type_flags"),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// The config file that [`Self::load`] reads, if any.
    pub fn active_path(config_file: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = config_file {
            return Some(path.clone());
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        Some(Self::config_path()).filter(|p| p.is_file())
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.appgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "appgen", "appgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// Generator settings for the core services.
    pub fn generator_settings(&self) -> CliResult<GeneratorSettings> {
        let id_strategy: IdentifierStrategy =
            self.model.id_type.parse().map_err(|e| CliError::ConfigError {
                message: format!("model.id_type: {e}"),
                source: Some(Box::new(e)),
            })?;

        let default_traits = self
            .model
            .default_traits
            .iter()
            .map(|(identifier, fqn)| {
                QualifiedName::parse(fqn)
                    .map(|name| (identifier.clone(), name))
                    .map_err(|e| CliError::ConfigError {
                        message: format!("model.default_traits.{identifier}: {e}"),
                        source: Some(Box::new(e)),
                    })
            })
            .collect::<CliResult<BTreeMap<_, _>>>()?;

        Ok(GeneratorSettings {
            id_strategy,
            type_flags: self.model.type_flags.clone(),
            default_traits,
        })
    }

    /// Look up a dotted key such as `model.id_type`.
    pub fn get(&self, key: &str) -> CliResult<serde_json::Value> {
        let root = serde_json::to_value(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
            .ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })
    }

    /// Directory generated files go under, preferring the CLI override.
    pub fn resolve_app_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.app_dir.clone())
    }
}
