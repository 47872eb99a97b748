//! TOML schema loader.
//!
//! Parses schema files into domain [`FormSchema`] objects. A directory of
//! schemas is walked recursively; every `*.toml` file is one schema.
//!
//! # Schema file format
//!
//! ```toml
//! [schema]
//! name        = "sitter_profile"      # unique, used on the command line
//! description = "Sitter public page"  # optional
//!
//! [[fields]]
//! name       = "full_name"
//! required   = true
//! min_length = 3
//! max_length = 60
//! initial    = ""                     # optional starting value
//!
//! [[fields]]
//! name    = "hourly_rate"
//! numeric = true
//! custom  = "hourly_rate"             # named predicate, see `PredicateRegistry`
//!
//! [fields.messages]                   # optional per-rule overrides
//! numeric = "Rate must be a number"
//! ```
//!
//! Rule keys are `required`, `min_length`, `max_length`, `pattern`, `email`,
//! `numeric` and `custom`. Unknown keys are rejected so that typos do not
//! silently drop a rule.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use formguard_core::{
    application::ApplicationError,
    domain::{DomainError, FormSchema, RuleMessages, RuleSet},
    error::FormguardResult,
};

use crate::predicates::PredicateRegistry;

/// File extension recognised by [`TomlSchemaLoader::load_dir`].
pub const SCHEMA_EXTENSION: &str = "toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a schema file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SchemaManifest {
    pub schema: SchemaSection,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// `[schema]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SchemaSection {
    pub name: String,
    pub description: Option<String>,
}

/// One entry under `[[fields]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub numeric: bool,
    /// Name of a predicate in the loader's [`PredicateRegistry`].
    pub custom: Option<String>,
    pub initial: Option<String>,
    #[serde(default)]
    pub messages: RuleMessages,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`FormSchema`] objects from TOML sources.
///
/// # Example
///
/// ```no_run
/// use formguard_adapters::TomlSchemaLoader;
///
/// let loader = TomlSchemaLoader::default();
/// let schemas = loader.load_dir("./schemas")?;
/// println!("Loaded {} schemas", schemas.len());
/// # Ok::<(), formguard_core::error::FormguardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TomlSchemaLoader {
    predicates: PredicateRegistry,
}

impl TomlSchemaLoader {
    pub fn new(predicates: PredicateRegistry) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &PredicateRegistry {
        &self.predicates
    }

    /// Parse one schema from `source`. `origin` is only used in error messages.
    pub fn parse_str(&self, source: &str, origin: &Path) -> FormguardResult<FormSchema> {
        let manifest: SchemaManifest =
            toml::from_str(source).map_err(|e| ApplicationError::SchemaLoad {
                path: origin.to_path_buf(),
                reason: e.to_string().trim_end().to_string(),
            })?;
        Ok(self.build(manifest)?)
    }

    /// Load a single schema file.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn load_file(&self, path: impl AsRef<Path>) -> FormguardResult<FormSchema> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::SchemaLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let schema = self.parse_str(&raw, path)?;
        debug!(schema = %schema.name, fields = schema.fields().len(), "loaded schema");
        Ok(schema)
    }

    /// Load every schema file found under `dir`.
    ///
    /// # Errors
    ///
    /// Fails only if `dir` itself is missing or unreadable. Files that do not
    /// parse are skipped with a `WARN` log so one bad schema does not hide
    /// the rest.
    #[instrument(skip(self), fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> FormguardResult<Vec<FormSchema>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ApplicationError::SchemaLoad {
                path: dir.to_path_buf(),
                reason: "schema directory not found".into(),
            }
            .into());
        }

        let mut schemas = Vec::new();
        for path in schema_files(dir)? {
            match self.load_file(&path) {
                Ok(schema) => schemas.push(schema),
                Err(e) => {
                    warn!(
                        path  = %path.display(),
                        error = %e,
                        "skipping schema file due to load error"
                    );
                }
            }
        }

        debug!(count = schemas.len(), "finished loading schemas");
        Ok(schemas)
    }

    fn build(&self, manifest: SchemaManifest) -> Result<FormSchema, DomainError> {
        let mut builder = FormSchema::builder(manifest.schema.name)
            .description(manifest.schema.description.unwrap_or_default());

        for entry in manifest.fields {
            if let Some(initial) = &entry.initial {
                builder = builder.initial(entry.name.clone(), initial.clone());
            }
            let rules = self.rules_for(&entry)?;
            builder = builder.field(entry.name, rules);
        }

        builder.build()
    }

    fn rules_for(&self, entry: &FieldEntry) -> Result<RuleSet, DomainError> {
        let mut rules = RuleSet::builder().messages(entry.messages.clone());
        if entry.required {
            rules = rules.required();
        }
        if let Some(min) = entry.min_length {
            rules = rules.min_length(min);
        }
        if let Some(max) = entry.max_length {
            rules = rules.max_length(max);
        }
        if let Some(pattern) = &entry.pattern {
            rules = rules.pattern(pattern.clone());
        }
        if entry.email {
            rules = rules.email();
        }
        if entry.numeric {
            rules = rules.numeric();
        }
        if let Some(name) = &entry.custom {
            let rule = self
                .predicates
                .get(name)
                .ok_or_else(|| DomainError::UnknownPredicate {
                    field: entry.name.clone(),
                    name: name.clone(),
                })?;
            rules = rules.custom(rule);
        }
        rules.build()
    }
}

impl Default for TomlSchemaLoader {
    fn default() -> Self {
        Self::new(PredicateRegistry::builtin())
    }
}

/// All `*.toml` files under `dir`, sorted for a stable load order.
fn schema_files(dir: &Path) -> FormguardResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| ApplicationError::SchemaLoad {
            path: dir.to_path_buf(),
            reason: format!("directory walk error: {e}"),
        })?;
        let is_schema = entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(SCHEMA_EXTENSION);
        if is_schema {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formguard_core::{domain::RuleKind, error::FormguardError};
    use tempfile::TempDir;

    const PROFILE: &str = r#"
[schema]
name = "sitter_profile"
description = "Sitter public page"

[[fields]]
name = "full_name"
required = true
min_length = 3
initial = "Bia"

[[fields]]
name = "hourly_rate"
required = true
numeric = true
custom = "hourly_rate"

[fields.messages]
numeric = "Rate must be a number"
"#;

    fn parse(source: &str) -> FormguardResult<FormSchema> {
        TomlSchemaLoader::default().parse_str(source, Path::new("test.toml"))
    }

    #[test]
    fn parses_fields_rules_and_initials() {
        let schema = parse(PROFILE).unwrap();
        assert_eq!(schema.name, "sitter_profile");
        assert_eq!(schema.description, "Sitter public page");
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.initial_value("full_name"), Some("Bia"));

        let rate = schema.field("hourly_rate").unwrap();
        assert_eq!(
            rate.kinds(),
            vec![RuleKind::Required, RuleKind::Numeric, RuleKind::Custom]
        );
        assert_eq!(rate.evaluate("abc").as_deref(), Some("Rate must be a number"));
        assert_eq!(rate.evaluate("0").as_deref(), Some("Must be greater than zero"));
    }

    #[test]
    fn unknown_predicate_is_domain_error() {
        let source = r#"
[schema]
name = "x"
[[fields]]
name = "a"
custom = "does_not_exist"
"#;
        assert!(matches!(
            parse(source),
            Err(FormguardError::Domain(DomainError::UnknownPredicate { .. }))
        ));
    }

    #[test]
    fn typo_in_rule_key_is_load_error() {
        let source = r#"
[schema]
name = "x"
[[fields]]
name = "a"
requird = true
"#;
        assert!(matches!(
            parse(source),
            Err(FormguardError::Application(ApplicationError::SchemaLoad { .. }))
        ));
    }

    #[test]
    fn bad_pattern_and_bounds_are_rejected() {
        let pattern = "[schema]\nname = \"x\"\n[[fields]]\nname = \"a\"\npattern = \"(\"\n";
        assert!(matches!(
            parse(pattern),
            Err(FormguardError::Domain(DomainError::InvalidPattern { .. }))
        ));

        let bounds =
            "[schema]\nname = \"x\"\n[[fields]]\nname = \"a\"\nmin_length = 5\nmax_length = 2\n";
        assert!(matches!(
            parse(bounds),
            Err(FormguardError::Domain(DomainError::InvalidBounds { min: 5, max: 2 }))
        ));
    }

    #[test]
    fn load_dir_missing_is_error() {
        let loader = TomlSchemaLoader::default();
        assert!(loader.load_dir("/definitely/not/here").is_err());
    }

    #[test]
    fn load_dir_skips_bad_files_and_non_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("profile.toml"), PROFILE).unwrap();
        fs::write(temp.path().join("broken.toml"), "[schema\nname=").unwrap();
        fs::write(temp.path().join("notes.md"), "# not a schema").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(
            temp.path().join("nested/contact.toml"),
            "[schema]\nname = \"contact\"\n[[fields]]\nname = \"email\"\nemail = true\n",
        )
        .unwrap();

        let schemas = TomlSchemaLoader::default().load_dir(temp.path()).unwrap();
        let mut names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["contact", "sitter_profile"]);
    }

    #[test]
    fn custom_registry_is_used() {
        let mut registry = PredicateRegistry::new();
        registry.register("even", |v| {
            (v.len() % 2 == 1).then(|| "Length must be even".to_string())
        });
        let loader = TomlSchemaLoader::new(registry);
        let schema = loader
            .parse_str(
                "[schema]\nname = \"x\"\n[[fields]]\nname = \"a\"\ncustom = \"even\"\n",
                Path::new("x.toml"),
            )
            .unwrap();
        assert_eq!(
            schema.field("a").unwrap().evaluate("abc").as_deref(),
            Some("Length must be even")
        );
        assert!(loader.predicates().contains("even"));
    }
}
