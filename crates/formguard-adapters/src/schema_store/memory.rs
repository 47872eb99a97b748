//! In-memory schema store with built-in schemas.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use formguard_core::{
    application::{ApplicationError, ports::SchemaStore},
    domain::{DomainValidator as validator, FormSchema},
    error::FormguardResult,
};

use crate::{builtin_schemas, schema_loader::TomlSchemaLoader};

/// Thread-safe in-memory schema store, keyed by schema name.
#[derive(Clone, Default)]
pub struct InMemorySchemaStore {
    inner: Arc<RwLock<HashMap<String, FormSchema>>>,
}

impl InMemorySchemaStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in schemas loaded.
    pub fn with_builtin(loader: &TomlSchemaLoader) -> FormguardResult<Self> {
        let store = Self::new();
        store.load_builtin(loader)?;
        Ok(store)
    }

    /// Load the built-in schemas.
    pub fn load_builtin(&self, loader: &TomlSchemaLoader) -> FormguardResult<()> {
        for schema in builtin_schemas::all_schemas(loader)? {
            self.insert(schema)?;
        }
        Ok(())
    }

    /// Load every schema under `dir`. Schemas with a built-in name replace it.
    pub fn load_dir(
        &self,
        loader: &TomlSchemaLoader,
        dir: impl AsRef<Path>,
    ) -> FormguardResult<usize> {
        let dir = dir.as_ref();
        let schemas = loader.load_dir(dir)?;
        let count = schemas.len();
        for schema in schemas {
            self.insert(schema)?;
        }
        info!(dir = %dir.display(), count, "schemas loaded from directory");
        Ok(count)
    }

    /// Get the number of schemas.
    pub fn len(&self) -> FormguardResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.len())
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> FormguardResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove a schema, returning whether it was present.
    pub fn remove(&self, name: &str) -> FormguardResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.remove(name).is_some())
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn get(&self, name: &str) -> FormguardResult<FormSchema> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::SchemaNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> FormguardResult<Vec<FormSchema>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, schema: FormSchema) -> FormguardResult<()> {
        // Validate before insertion
        validator::validate_schema(&schema)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(schema.name.clone(), schema);
        Ok(())
    }
}
