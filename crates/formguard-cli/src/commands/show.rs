//! Implementation of the `formguard show` command.

use serde::Serialize;

use formguard_core::domain::{FormSchema, RuleKind};

use crate::{
    cli::ShowArgs, commands::Catalogue, config::AppConfig, error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct SchemaView<'a> {
    name: &'a str,
    description: &'a str,
    fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Serialize)]
struct FieldView<'a> {
    name: &'a str,
    rules: Vec<RuleKind>,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial: Option<&'a str>,
}

impl<'a> From<&'a FormSchema> for SchemaView<'a> {
    fn from(schema: &'a FormSchema) -> Self {
        Self {
            name: &schema.name,
            description: &schema.description,
            fields: schema
                .fields()
                .iter()
                .map(|(name, rules)| FieldView {
                    name: name.as_str(),
                    rules: rules.kinds(),
                    summary: rules.describe(),
                    initial: schema.initial_value(name.as_str()),
                })
                .collect(),
        }
    }
}

/// Print every field of a schema with its rules in evaluation order.
pub fn execute(args: ShowArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let catalogue = Catalogue::load(config)?;
    let name = catalogue.resolve(&args.schema)?;
    let schema = catalogue.service().schema(&name)?;
    let view = SchemaView::from(&schema);

    if output.is_json() {
        output.json(&view)?;
        return Ok(());
    }

    output.header(view.name)?;
    if !view.description.is_empty() {
        output.detail(view.description)?;
    }
    output.print("")?;

    let width = view.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in &view.fields {
        let summary = if field.summary.is_empty() {
            "(no rules)"
        } else {
            field.summary.as_str()
        };
        let mut line = format!("  {:<width$}  {}", field.name, summary);
        if let Some(initial) = field.initial {
            line.push_str(&format!("  [initial: {initial:?}]"));
        }
        output.print(&line)?;
    }
    Ok(())
}
