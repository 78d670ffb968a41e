//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "appgen",
    bin_name = "appgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Doctrine model scaffolding",
    long_about = "appgen generates a consistent set of PHP classes for one \
                  Doctrine entity: the entity, its data object and factories, \
                  a repository, a facade, a not-found exception and events.",
    after_help = "EXAMPLES:\n\
        \x20 appgen model                       # interactive wizard\n\
        \x20 appgen model --spec user.toml\n\
        \x20 appgen model --spec user.toml --dry-run --output-format json\n\
        \x20 appgen completions bash > /usr/share/bash-completion/completions/appgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the classes for one entity.
    #[command(
        visible_alias = "m",
        about = "Generate model classes",
        after_help = "EXAMPLES:\n\
            \x20 appgen model\n\
            \x20 appgen model --spec models/book.toml --app-dir src"
    )]
    Model(ModelArgs),

    /// Initialise an appgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 appgen init           # .appgen.toml in the current directory\n\
            \x20 appgen init --global  # user configuration directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 appgen completions bash > ~/.local/share/bash-completion/completions/appgen\n\
            \x20 appgen completions zsh  > ~/.zfunc/_appgen\n\
            \x20 appgen completions fish > ~/.config/fish/completions/appgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the appgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 appgen config get model.id_type\n\
            \x20 appgen config list\n\
            \x20 appgen config path"
    )]
    Config(ConfigCommands),
}

// ── model ─────────────────────────────────────────────────────────────────────

/// Arguments for `appgen model`.
#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Model definition file; without it the interactive wizard runs.
    #[arg(
        short = 's',
        long = "spec",
        value_name = "FILE",
        help = "Model definition (.toml or .json) instead of the wizard"
    )]
    pub spec: Option<PathBuf>,

    /// Application source directory; overrides `app_dir` from config.
    #[arg(
        short = 'd',
        long = "app-dir",
        value_name = "DIR",
        help = "Application source directory (default: config app_dir)"
    )]
    pub app_dir: Option<PathBuf>,

    /// Render everything but write nothing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `appgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user configuration directory instead of `.appgen.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `appgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `appgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `model.id_type`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in effect.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_model_command() {
        let cli = Cli::parse_from([
            "appgen",
            "model",
            "--spec",
            "user.toml",
            "--app-dir",
            "src",
            "--dry-run",
        ]);
        let Commands::Model(args) = cli.command else {
            panic!("expected model command");
        };
        assert_eq!(args.spec, Some(PathBuf::from("user.toml")));
        assert_eq!(args.app_dir, Some(PathBuf::from("src")));
        assert!(args.dry_run);
    }

    #[test]
    fn model_alias() {
        let cli = Cli::parse_from(["appgen", "m"]);
        assert!(matches!(cli.command, Commands::Model(ModelArgs { spec: None, .. })));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["appgen", "config", "list", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["appgen", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
