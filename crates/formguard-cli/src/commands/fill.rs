//! Implementation of the `formguard fill` command.
//!
//! Prompts every field in schema order. Answering a prompt is a value
//! change followed by a blur, so the field's error shows up as soon as the
//! answer is given. Submitting at the end validates the whole form.
//!
//! Prompts and rejected answers go to stderr; stdout carries only the
//! outcome, which is a single JSON document under `--format json`.

use formguard_core::{domain::FormState, error::FormguardError};

use crate::{
    cli::FillArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[cfg(feature = "interactive")]
pub fn execute(args: FillArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    use dialoguer::Input;
    use tracing::info;

    use crate::commands::Catalogue;

    let catalogue = Catalogue::load(config)?;
    let schema = catalogue.resolve(&args.schema)?;
    let mut form = catalogue
        .service()
        .open(&schema, Vec::<(String, String)>::new())?;

    if !output.is_json() {
        output.header(&format!("Filling '{schema}'"))?;
    }
    fill_fields(
        &mut form,
        args.keep_going,
        |field, current| {
            Input::<String>::new()
                .with_prompt(field)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)
        },
        |field, error| Ok(output.answer_rejected(&format!("{field}: {error}"))?),
    )?;

    let valid = form.validate_all();
    let report = form.report();
    info!(valid, errors = report.error_count(), "form submitted");

    if output.is_json() {
        output.json(&report)?;
    } else if valid {
        output.success(&format!("'{schema}' is valid"))?;
    } else {
        for field in report.invalid_fields() {
            output.error(&format!(
                "{}: {}",
                field.name,
                field.error.as_deref().unwrap_or_default()
            ))?;
        }
    }

    if valid {
        Ok(())
    } else {
        Err(CliError::InvalidForm {
            schema,
            count: report.error_count(),
        })
    }
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => CliError::Cancelled,
        other => CliError::Prompt {
            message: other.to_string(),
        },
    }
}

#[cfg(not(feature = "interactive"))]
pub fn execute(_args: FillArgs, _config: &AppConfig, _output: &OutputManager) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Ask for every field in schema order.
///
/// `prompt` gets the field name and its current value and returns the
/// answer. A rejected answer is passed to `rejected` with the field's error,
/// then the field is asked again unless `keep_going` is set.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn fill_fields<P, R>(
    form: &mut FormState,
    keep_going: bool,
    mut prompt: P,
    mut rejected: R,
) -> CliResult<()>
where
    P: FnMut(&str, &str) -> CliResult<String>,
    R: FnMut(&str, &str) -> CliResult<()>,
{
    let fields: Vec<String> = form.field_names().map(ToString::to_string).collect();
    for field in &fields {
        loop {
            let current = form.value(field).unwrap_or_default().to_string();
            let answer = prompt(field, &current)?;

            form.set_field_value(field, answer)
                .map_err(FormguardError::from)?;
            form.mark_field_touched(field)
                .map_err(FormguardError::from)?;

            match form.error(field) {
                Some(error) => {
                    rejected(field, error)?;
                    if keep_going {
                        break;
                    }
                }
                None => break,
            }
        }
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
