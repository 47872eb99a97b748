//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `formguard-adapters` crate provides implementations.

use crate::domain::FormSchema;
use crate::error::FormguardResult;

/// Port for schema storage and retrieval.
///
/// Implemented by:
/// - `formguard_adapters::InMemorySchemaStore` (built-in and loaded schemas)
///
/// Schemas hold custom predicates as closures, so stores hand out clones of
/// fully-built schemas rather than raw definitions.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaStore: Send + Sync {
    /// Get a schema by name.
    fn get(&self, name: &str) -> FormguardResult<FormSchema>;

    /// List all available schemas.
    fn list(&self) -> FormguardResult<Vec<FormSchema>>;

    /// Insert or replace a schema.
    fn insert(&self, schema: FormSchema) -> FormguardResult<()>;
}
