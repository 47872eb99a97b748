//! Implementation of the `formguard check` command.
//!
//! Responsibility: gather submitted values (JSON file, stdin, `--set`),
//! hand them to the core service and display the per-field report. No
//! validation logic lives here.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use serde_json::Value;
use tracing::{debug, instrument};

use formguard_core::domain::FormReport;

use crate::{
    cli::CheckArgs,
    commands::Catalogue,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `formguard check` command.
///
/// Exits with code 2 when any field fails validation.
#[instrument(skip_all, fields(schema = %args.schema))]
pub fn execute(args: CheckArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let catalogue = Catalogue::load(config)?;
    let schema = catalogue.resolve(&args.schema)?;

    let mut values = match &args.values {
        Some(path) => read_values(path)?,
        None => Vec::new(),
    };
    // `--set` wins over the values file.
    values.extend(args.set);
    debug!(values = values.len(), "submission assembled");

    let report = catalogue.service().check(&schema, values)?;
    render(&schema, &report, output)?;

    if report.valid {
        Ok(())
    } else {
        Err(CliError::InvalidForm {
            schema,
            count: report.error_count(),
        })
    }
}

fn render(schema: &str, report: &FormReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    output.header(schema)?;
    for field in &report.fields {
        match (&field.error, field.rule) {
            (Some(error), Some(rule)) => {
                output.error(&format!("{}: {} [{}]", field.name, error, rule))?
            }
            (Some(error), None) => output.error(&format!("{}: {}", field.name, error))?,
            (None, _) => output.success(&field.name)?,
        }
    }

    if report.valid {
        output.print("")?;
        output.success(&format!("All {} fields valid", report.fields.len()))?;
    }
    Ok(())
}

/// Read a JSON object of field values from `path`, or stdin for `-`.
fn read_values(path: &Path) -> CliResult<Vec<(String, String)>> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .with_cli_context(|| "reading values from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_cli_context(|| format!("reading values from '{}'", path.display()))?
    };
    parse_values(&raw)
}

/// Scalars become strings (`null` is empty); nested values are rejected.
fn parse_values(raw: &str) -> CliResult<Vec<(String, String)>> {
    let document: Value =
        serde_json::from_str(raw).with_cli_context(|| "values are not valid JSON")?;

    let Value::Object(map) = document else {
        return Err(CliError::InvalidInput {
            message: "values must be a JSON object of field names to values".into(),
            source: None,
        });
    };

    map.into_iter()
        .map(|(field, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(CliError::InvalidInput {
                        message: format!(
                            "value of '{field}' must be a string, number, boolean or null"
                        ),
                        source: None,
                    });
                }
            };
            Ok((field, text))
        })
        .collect()
}
