//! Infrastructure adapters for formguard.
//!
//! This crate implements the ports defined in `formguard-core::application::ports`.
//! It contains the TOML schema format, the built-in schema catalogue and the
//! registry of named custom predicates that schema files refer to.

pub mod builtin_schemas;
pub mod predicates;
pub mod schema_loader;
pub mod schema_store;

// Re-export commonly used adapters
pub use predicates::PredicateRegistry;
pub use schema_loader::TomlSchemaLoader;
pub use schema_store::InMemorySchemaStore;
