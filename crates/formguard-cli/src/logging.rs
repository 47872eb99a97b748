//! Diagnostics for the `formguard` binary.
//!
//! The library crates emit events; this module decides where they go. Logs
//! always land on stderr so stdout stays clean for reports. When reports are
//! JSON the logs are JSON lines too, which keeps `formguard ... 2>log.jsonl`
//! machine-readable end to end.
//!
//! Levels: `--quiet` ERROR, default WARN, `-v` INFO (loaded schemas,
//! results), `-vv` DEBUG (field error transitions), `-vvv` TRACE.
//! `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events pass the verbosity filter.
const CRATES: [&str; 3] = ["formguard", "formguard_core", "formguard_adapters"];

/// Install the global subscriber. Call once, before any event fires.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbosity(args))));

    let json = args.output_format == Some(OutputFormat::Json);
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(std::io::stderr)
    });
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn verbosity(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `formguard=<level>,formguard_core=<level>,...`
fn filter_directives(level: LevelFilter) -> String {
    CRATES.map(|krate| format!("{krate}={level}")).join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: None,
        }
    }

    #[test]
    fn verbosity_ladder() {
        assert_eq!(verbosity(&args(0, false)), LevelFilter::WARN);
        assert_eq!(verbosity(&args(1, false)), LevelFilter::INFO);
        assert_eq!(verbosity(&args(2, false)), LevelFilter::DEBUG);
        assert_eq!(verbosity(&args(7, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(verbosity(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_name_each_crate() {
        assert_eq!(
            filter_directives(LevelFilter::DEBUG).to_lowercase(),
            "formguard=debug,formguard_core=debug,formguard_adapters=debug"
        );
    }
}
