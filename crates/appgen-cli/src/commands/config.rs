//! `appgen config` - inspect configuration values.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&std::path::PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                // Bypasses quiet: the value is the result.
                println!("{}", display_value(&value)?);
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(config_file).unwrap_or_else(AppConfig::config_path);
            println!("{}", path.display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Strings print bare; tables print as TOML; everything else as JSON.
fn display_value(value: &Value) -> CliResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) => toml::to_string_pretty(value).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        }),
        other => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
