//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args};

/// Flattened into [`super::Cli`]; every field is `global = true`.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "More diagnostics on stderr (-v, -vv, -vvv)",
        long_help = "More diagnostics on stderr:
    -v      loaded schemas and check results
    -vv     every field error transition
    -vvv    everything"
    )]
    pub verbose: u8,

    /// Only failures are printed; reports on stdout are kept.
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Print failures only"
    )]
    pub quiet: bool,

    /// Also enabled by a non-empty `NO_COLOR` (<https://no-color.org>).
    #[arg(long, global = true, env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the default locations"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        help = "Report format [default: output.format from config, else auto]"
    )]
    pub output_format: Option<OutputFormat>,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Symbols and colour.
    Human,
    /// Symbols, no colour.
    Plain,
    /// One JSON document per command.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    /// Parses the `output.format` config value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "human" => Ok(Self::Human),
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected auto, human, plain or json)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_from_config_string() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" plain ".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
