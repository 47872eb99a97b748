//! Implementation of the `formguard list` command.

use formguard_core::application::SchemaInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    commands::Catalogue,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let schemas = Catalogue::load(config)?.service().list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Schemas:")?;
            let width = schemas.iter().map(|s| s.name.len()).max().unwrap_or(0);
            for info in &schemas {
                output.print(&table_row(info, width))?;
            }
        }

        ListFormat::Json => output.json(&schemas)?,

        ListFormat::List => {
            for info in &schemas {
                output.print(&info.name)?;
            }
        }

        ListFormat::Csv => {
            output.print("name,fields,required,description")?;
            for info in &schemas {
                output.print(&csv_row(info))?;
            }
        }
    }

    Ok(())
}

fn table_row(info: &SchemaInfo, width: usize) -> String {
    format!(
        "  {:<width$}  {:>2} fields ({} required)  {}",
        info.name, info.fields, info.required, info.description
    )
}

fn csv_row(info: &SchemaInfo) -> String {
    format!(
        "{},{},{},{}",
        csv_field(&info.name),
        info.fields,
        info.required,
        csv_field(&info.description)
    )
}

/// Quote a CSV field when it holds a separator, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(description: &str) -> SchemaInfo {
        SchemaInfo {
            name: "contact".into(),
            description: description.into(),
            fields: 3,
            required: 3,
        }
    }

    #[test]
    fn csv_quotes_when_needed() {
        assert_eq!(csv_row(&info("Support")), "contact,3,3,Support");
        assert_eq!(
            csv_row(&info("Say \"hi\", please")),
            "contact,3,3,\"Say \"\"hi\"\", please\""
        );
    }

    #[test]
    fn table_row_pads_names() {
        let row = table_row(&info("Support"), 10);
        assert!(row.starts_with("  contact     "));
        assert!(row.contains("3 fields (3 required)"));
    }
}
