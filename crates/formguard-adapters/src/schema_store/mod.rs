//! Schema storage adapters.

mod memory;

pub use memory::InMemorySchemaStore;
