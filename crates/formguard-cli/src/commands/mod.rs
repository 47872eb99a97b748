//! Command handlers.
//!
//! Each submodule translates parsed arguments into calls on the core
//! [`ValidationService`] and renders the result. Schema lookup shared by the
//! handlers lives in [`Catalogue`].

pub mod check;
pub mod completions;
pub mod config;
pub mod eval;
pub mod fill;
pub mod init;
pub mod list;
pub mod show;

use std::path::Path;

use tracing::{debug, instrument};

use formguard_adapters::{InMemorySchemaStore, TomlSchemaLoader};
use formguard_core::{
    application::{ApplicationError, SchemaStore, ValidationService},
    error::FormguardError,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Built-in schemas plus the configured schema directory.
pub struct Catalogue {
    loader: TomlSchemaLoader,
    store: InMemorySchemaStore,
}

impl Catalogue {
    /// Seed the built-ins, then load `schemas.dir` from the configuration.
    #[instrument(skip_all)]
    pub fn load(config: &AppConfig) -> CliResult<Self> {
        let loader = TomlSchemaLoader::default();
        let store = InMemorySchemaStore::with_builtin(&loader)?;

        if let Some(dir) = &config.schemas.dir {
            if !dir.is_dir() {
                return Err(CliError::ConfigError {
                    message: format!("schemas.dir '{}' is not a directory", dir.display()),
                    source: None,
                });
            }
            store.load_dir(&loader, dir)?;
        }

        debug!(schemas = store.len()?, "catalogue ready");
        Ok(Self { loader, store })
    }

    /// Resolve a SCHEMA argument to a schema name.
    ///
    /// Arguments ending in `.toml` are loaded from disk and added to the
    /// catalogue; anything else is a schema name.
    pub fn resolve(&self, schema: &str) -> CliResult<String> {
        if !is_schema_path(schema) {
            return Ok(schema.to_string());
        }
        if !Path::new(schema).exists() {
            return Err(FormguardError::from(ApplicationError::SchemaNotFound {
                name: schema.to_string(),
            })
            .into());
        }
        let loaded = self.loader.load_file(schema)?;
        let name = loaded.name.clone();
        self.store.insert(loaded)?;
        debug!(path = schema, schema = %name, "schema loaded from file");
        Ok(name)
    }

    /// Service over this catalogue; clones of the store share its contents.
    pub fn service(&self) -> ValidationService {
        ValidationService::new(Box::new(self.store.clone()))
    }
}

fn is_schema_path(schema: &str) -> bool {
    Path::new(schema)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn schema_paths_are_detected_by_extension() {
        assert!(is_schema_path("review.toml"));
        assert!(is_schema_path("./schemas/REVIEW.TOML"));
        assert!(!is_schema_path("signup"));
        assert!(!is_schema_path("notes.json"));
    }

    #[test]
    fn builtin_names_resolve_to_themselves() {
        let catalogue = Catalogue::load(&AppConfig::default()).unwrap();
        assert_eq!(catalogue.resolve("signup").unwrap(), "signup");
        assert_eq!(catalogue.service().list().unwrap().len(), 4);
    }

    #[test]
    fn schema_file_is_added_to_catalogue() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("review.toml");
        fs::write(
            &path,
            "[schema]\nname = \"review\"\n[[fields]]\nname = \"stars\"\nrequired = true\n",
        )
        .unwrap();

        let catalogue = Catalogue::load(&AppConfig::default()).unwrap();
        let name = catalogue.resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(name, "review");
        assert!(catalogue.service().schema("review").is_ok());
    }

    #[test]
    fn missing_schema_file_is_not_found() {
        let catalogue = Catalogue::load(&AppConfig::default()).unwrap();
        let err = catalogue.resolve("no/such/review.toml").unwrap_err();
        assert!(err.to_string().contains("no/such/review.toml"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn configured_directory_must_exist() {
        let mut config = AppConfig::default();
        config.schemas.dir = Some("/definitely/not/here".into());
        assert!(matches!(
            Catalogue::load(&config),
            Err(CliError::ConfigError { .. })
        ));
    }
}
