//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "check these values against a schema".

pub mod validation_service;

pub use validation_service::{SchemaInfo, ValidationService};
