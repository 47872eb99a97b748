//! formguard Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the formguard
//! validation engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          formguard-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (ValidationService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Driven: SchemaStore)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    formguard-adapters (Infrastructure)  │
//! │ (InMemorySchemaStore, TomlSchemaLoader) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │     (RuleSet, FormState, FormSchema)    │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use formguard_core::domain::{FieldName, FormState, RuleSet};
//!
//! let email = FieldName::new("email").unwrap();
//! let mut form = FormState::new(
//!     [(email.clone(), String::new())],
//!     [(email, RuleSet::builder().required().email().build().unwrap())],
//! );
//!
//! form.set_field_value("email", "ana@").unwrap();
//! assert_eq!(form.error("email"), None); // untouched: nothing shown yet
//!
//! form.mark_field_touched("email").unwrap();
//! assert_eq!(form.error("email"), Some("Invalid email address"));
//!
//! form.set_field_value("email", "ana@example.com").unwrap();
//! assert!(form.validate_all());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{SchemaInfo, ValidationService, ports::SchemaStore};
    pub use crate::domain::{
        CustomRule, FieldName, FormReport, FormSchema, FormState, RuleKind, RuleMessages, RuleSet,
        RuleSetBuilder, Violation,
    };
    pub use crate::error::{FormguardError, FormguardResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
