//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::warn;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on flags and configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    prompts: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = args.output_format.unwrap_or_else(|| {
            config.output.format.parse::<OutputFormat>().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring output.format from configuration");
                OutputFormat::Auto
            })
        });

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
            prompts: Term::stderr(),
        }
    }

    // ── Writers ────────────────────────────────────────────────────────────

    /// Unstyled line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.write(false, msg, None)
    }

    /// `✓ msg` in green; suppressed in quiet mode.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.write(false, &format!("\u{2713} {msg}"), Some(|t: &str| t.green().to_string()))
    }

    /// `✗ msg` in red; always printed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.write(true, &format!("\u{2717} {msg}"), Some(|t: &str| t.red().to_string()))
    }

    /// `✗ msg` in red on stderr, beside interactive prompts. Stdout is left
    /// to the report.
    pub fn answer_rejected(&self, msg: &str) -> io::Result<()> {
        let line = format!("\u{2717} {msg}");
        if self.no_color {
            self.prompts.write_line(&line)
        } else {
            self.prompts.write_line(&line.red().to_string())
        }
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.write(false, text, Some(|t: &str| t.cyan().bold().to_string()))
    }

    pub fn detail(&self, text: &str) -> io::Result<()> {
        self.write(false, text, Some(|t: &str| t.dimmed().to_string()))
    }

    /// Pretty JSON document.  Data output, so quiet mode does not apply.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn write(&self, always: bool, line: &str, style: Option<fn(&str) -> String>) -> io::Result<()> {
        if self.quiet && !always {
            return Ok(());
        }
        match style {
            Some(style) if !self.no_color => self.term.write_line(&style(line)),
            _ => self.term.write_line(line),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(format: OutputFormat, no_color: bool, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            output_format: Some(format),
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: Some(OutputFormat::Plain),
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert!(out.quiet);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn colour_only_for_human_format() {
        let config = AppConfig::default();
        assert!(!make_manager(OutputFormat::Human, false, &config).no_color);
        assert!(make_manager(OutputFormat::Human, true, &config).no_color);
        assert!(make_manager(OutputFormat::Plain, false, &config).no_color);
        assert!(make_manager(OutputFormat::Json, false, &config).no_color);
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(make_manager(OutputFormat::Human, false, &config).no_color);
    }

    #[test]
    fn flag_wins_over_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(OutputFormat::Plain, false, &config);
        assert_eq!(out.resolved_format, OutputFormat::Plain);
        assert!(!out.is_json());
    }

    #[test]
    fn config_format_used_without_flag() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: None,
        };
        assert!(OutputManager::new(&args, &config).is_json());
    }
}
