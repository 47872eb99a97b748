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
    name    = "formguard",
    bin_name = "formguard",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Declarative form validation",
    long_about = "formguard validates form submissions against named schemas \
                  (required, length, pattern, email, numeric and custom rules) \
                  and reports the first failing rule per field.",
    after_help = "EXAMPLES:\n\
        \x20 formguard list\n\
        \x20 formguard show signup\n\
        \x20 formguard check signup --set name=Ana --set email=ana@example.com\n\
        \x20 formguard check ./schemas/review.toml --values review.json\n\
        \x20 formguard eval sitter_profile age 17",
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
    /// Validate a full submission against a schema.
    #[command(
        visible_alias = "c",
        about = "Validate a submission",
        after_help = "EXAMPLES:\n\
            \x20 formguard check contact --set name=Ana --set email=ana@example.com \\\n\
            \x20     --set message='Is Saturday free?'\n\
            \x20 formguard check signup --values signup.json\n\
            \x20 cat booking.json | formguard check booking_request --values -\n\
            \x20 formguard --output-format json check signup --values signup.json"
    )]
    Check(CheckArgs),

    /// Evaluate a single value against one field.
    #[command(
        visible_alias = "e",
        about = "Evaluate one field value",
        after_help = "EXAMPLES:\n\
            \x20 formguard eval signup email ana@\n\
            \x20 formguard eval sitter_profile hourly_rate 25.50"
    )]
    Eval(EvalArgs),

    /// List available schemas.
    #[command(
        visible_alias = "ls",
        about = "List available schemas",
        after_help = "EXAMPLES:\n\
            \x20 formguard list\n\
            \x20 formguard list --format json"
    )]
    List(ListArgs),

    /// Show the rules of every field in a schema.
    #[command(
        about = "Show schema rules",
        after_help = "EXAMPLES:\n\
            \x20 formguard show booking_request\n\
            \x20 formguard show ./schemas/review.toml"
    )]
    Show(ShowArgs),

    /// Fill a form interactively, field by field.
    #[command(
        about = "Fill a form interactively",
        after_help = "EXAMPLES:\n\
            \x20 formguard fill signup\n\
            \x20 formguard fill sitter_profile --keep-going"
    )]
    Fill(FillArgs),

    /// Initialise a formguard configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 formguard init           # platform config directory\n\
            \x20 formguard init --local   # .formguard.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 formguard completions bash > ~/.local/share/bash-completion/completions/formguard\n\
            \x20 formguard completions zsh  > ~/.zfunc/_formguard\n\
            \x20 formguard completions fish > ~/.config/fish/completions/formguard.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the formguard configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 formguard config get schemas.dir\n\
            \x20 formguard config list\n\
            \x20 formguard config path"
    )]
    Config(ConfigCommands),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `formguard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Built-in schema name, or path to a `.toml` schema file.
    #[arg(value_name = "SCHEMA", help = "Schema name or .toml file")]
    pub schema: String,

    /// JSON object of field values (`-` reads stdin).
    #[arg(
        long = "values",
        value_name = "FILE",
        help = "JSON file with field values (- for stdin)"
    )]
    pub values: Option<PathBuf>,

    /// Single field assignment; may be repeated and wins over `--values`.
    #[arg(
        short = 's',
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        help = "Set one field (repeatable)"
    )]
    pub set: Vec<(String, String)>,
}

/// Parse `field=value`; the value may be empty or contain further `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

// ── eval ──────────────────────────────────────────────────────────────────────

/// Arguments for `formguard eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    #[arg(value_name = "SCHEMA", help = "Schema name or .toml file")]
    pub schema: String,

    #[arg(value_name = "FIELD", help = "Field to evaluate")]
    pub field: String,

    /// Value to evaluate; omitted means empty.
    #[arg(value_name = "VALUE", default_value = "", help = "Value to evaluate")]
    pub value: String,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `formguard list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `formguard show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "SCHEMA", help = "Schema name or .toml file")]
    pub schema: String,
}

// ── fill ──────────────────────────────────────────────────────────────────────

/// Arguments for `formguard fill`.
#[derive(Debug, Args)]
pub struct FillArgs {
    #[arg(value_name = "SCHEMA", help = "Schema name or .toml file")]
    pub schema: String,

    /// Move on after an invalid answer instead of asking again.
    #[arg(long = "keep-going", help = "Do not re-prompt invalid fields")]
    pub keep_going: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `formguard init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.formguard.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `formguard completions`.
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

/// Subcommands for `formguard config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `schemas.dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
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
    fn parse_check_with_assignments() {
        let cli = Cli::parse_from([
            "formguard",
            "check",
            "signup",
            "--set",
            "name=Ana",
            "-s",
            "password=a=b",
            "--set",
            "phone=",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected Check command");
        };
        assert_eq!(args.schema, "signup");
        assert_eq!(
            args.set,
            vec![
                ("name".to_string(), "Ana".to_string()),
                ("password".to_string(), "a=b".to_string()),
                ("phone".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn assignment_requires_field_name() {
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn eval_value_defaults_to_empty() {
        let cli = Cli::parse_from(["formguard", "eval", "signup", "phone"]);
        let Commands::Eval(args) = cli.command else {
            panic!("expected Eval command");
        };
        assert_eq!(args.value, "");
    }

    #[test]
    fn list_alias() {
        let cli = Cli::parse_from(["formguard", "ls", "--format", "csv"]);
        assert!(matches!(
            cli.command,
            Commands::List(ListArgs {
                format: ListFormat::Csv
            })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["formguard", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
