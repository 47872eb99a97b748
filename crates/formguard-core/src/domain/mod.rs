// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for formguard.
//!
//! This module contains pure validation logic. Where rule sets come from
//! (code, TOML files, a built-in catalogue) is the adapters' concern and is
//! reached through ports defined in the application layer.
//!
//! ## Rules of the layer
//!
//! - **No async**: every operation runs to completion synchronously
//! - **No I/O**: values in, verdicts out
//! - **Validation failures are data**: they live on the form state, never in
//!   a `Result`; `DomainError` is reserved for malformed rule definitions
//! - **Single owner**: a `FormState` is mutated through `&mut self` only
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod evaluation;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    CustomCheck, CustomRule, FieldReport, FormReport, FormSchema, FormSchemaBuilder, FormState,
    Pattern, RuleMessages, RuleSet, RuleSetBuilder, Violation,
};

pub use error::{DomainError, ErrorCategory};

pub use evaluation::evaluate;

pub use value_objects::{FieldName, RuleKind};

pub use validation::DomainValidator;
