//! Implementation of the `formguard eval` command.

use serde::Serialize;
use tracing::instrument;

use formguard_core::domain::{RuleKind, Violation};

use crate::{
    cli::EvalArgs,
    commands::Catalogue,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// JSON shape of an evaluation.
#[derive(Debug, Serialize)]
struct Evaluation<'a> {
    schema: &'a str,
    field: &'a str,
    value: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<RuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Evaluate one value against one field, as if the field had been touched.
#[instrument(skip_all, fields(schema = %args.schema, field = %args.field))]
pub fn execute(args: EvalArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let catalogue = Catalogue::load(config)?;
    let schema = catalogue.resolve(&args.schema)?;
    let violation = catalogue
        .service()
        .evaluate(&schema, &args.field, &args.value)?;

    render(&schema, &args, violation.as_ref(), output)?;

    match violation {
        None => Ok(()),
        Some(violation) => Err(CliError::InvalidValue {
            field: args.field,
            message: violation.message,
        }),
    }
}

fn render(
    schema: &str,
    args: &EvalArgs,
    violation: Option<&Violation>,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(&Evaluation {
            schema,
            field: &args.field,
            value: &args.value,
            valid: violation.is_none(),
            rule: violation.map(|v| v.rule),
            error: violation.map(|v| v.message.as_str()),
        })?;
        return Ok(());
    }

    match violation {
        None => output.success(&format!("{}: valid", args.field))?,
        Some(v) => output.error(&format!("{}: {} [{}]", args.field, v.message, v.rule))?,
    }
    Ok(())
}
