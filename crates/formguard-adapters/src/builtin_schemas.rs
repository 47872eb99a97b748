//! Built-in schemas.
//!
//! The forms of the booking app ship inside the binary, so `formguard check
//! signup` works without any schema directory. Sources live in `schemas/`
//! next to this crate and use the same format as user schema files.

use std::path::Path;

use tracing::{debug, instrument};

use formguard_core::{domain::FormSchema, error::FormguardResult};

use crate::schema_loader::TomlSchemaLoader;

/// `(file name, TOML source)` for every built-in schema.
pub const SOURCES: &[(&str, &str)] = &[
    ("signup.toml", include_str!("../schemas/signup.toml")),
    (
        "sitter_profile.toml",
        include_str!("../schemas/sitter_profile.toml"),
    ),
    (
        "booking_request.toml",
        include_str!("../schemas/booking_request.toml"),
    ),
    ("contact.toml", include_str!("../schemas/contact.toml")),
];

/// Parse every built-in schema with the given loader.
#[instrument(skip_all)]
pub fn all_schemas(loader: &TomlSchemaLoader) -> FormguardResult<Vec<FormSchema>> {
    let schemas = SOURCES
        .iter()
        .map(|(file, source)| loader.parse_str(source, Path::new(file)))
        .collect::<FormguardResult<Vec<_>>>()?;
    debug!(count = schemas.len(), "built-in schemas parsed");
    Ok(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formguard_core::domain::RuleKind;

    fn builtin() -> Vec<FormSchema> {
        all_schemas(&TomlSchemaLoader::default()).unwrap()
    }

    fn named(name: &str) -> FormSchema {
        builtin()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("missing built-in {name}"))
    }

    #[test]
    fn every_builtin_parses() {
        let names: Vec<String> = builtin().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["signup", "sitter_profile", "booking_request", "contact"]
        );
    }

    #[test]
    fn signup_rules() {
        let schema = named("signup");
        assert_eq!(schema.initial_value("role"), Some("parent"));

        let password = schema.field("password").unwrap();
        assert_eq!(
            password.evaluate("abc1").as_deref(),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password.check("abcdefgh").map(|v| v.rule),
            Some(RuleKind::Custom)
        );
        assert_eq!(password.evaluate("abcdefg1"), None);

        let role = schema.field("role").unwrap();
        assert_eq!(
            role.evaluate("admin").as_deref(),
            Some("Choose either parent or sitter")
        );

        // Optional phone passes when blank.
        assert_eq!(schema.field("phone").unwrap().evaluate(""), None);
    }

    #[test]
    fn sitter_profile_rules() {
        let schema = named("sitter_profile");
        let age = schema.field("age").unwrap();
        assert_eq!(age.check("sixteen").map(|v| v.rule), Some(RuleKind::Numeric));
        assert_eq!(age.check("16").map(|v| v.rule), Some(RuleKind::Custom));
        assert_eq!(age.evaluate("21"), None);

        let rate = schema.field("hourly_rate").unwrap();
        assert_eq!(
            rate.evaluate("ten").as_deref(),
            Some("Hourly rate must be a number")
        );
    }

    #[test]
    fn sitter_profile_rejects_infinite_numbers() {
        let schema = named("sitter_profile");
        for field in ["age", "hourly_rate"] {
            let rules = schema.field(field).unwrap();
            for value in ["inf", "infinity", "-inf", "+Infinity"] {
                assert_eq!(
                    rules.check(value).map(|v| v.rule),
                    Some(RuleKind::Numeric),
                    "{field}={value}"
                );
            }
        }
    }

    #[test]
    fn booking_request_rules() {
        let schema = named("booking_request");
        let date = schema.field("date").unwrap();
        assert_eq!(date.evaluate("2024-06-01"), None);
        assert_eq!(
            date.evaluate("01/06/2024").as_deref(),
            Some("Use the YYYY-MM-DD format")
        );

        let time = schema.field("start_time").unwrap();
        assert_eq!(time.evaluate("18:30"), None);
        assert!(time.evaluate("24:00").is_some());
        assert_eq!(schema.initial_value("children"), Some("1"));
    }
}
