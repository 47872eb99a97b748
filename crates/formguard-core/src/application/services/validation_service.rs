//! Validation Service - main application orchestrator.
//!
//! This service resolves schemas through the [`SchemaStore`] port and runs
//! the form lifecycle on them:
//! 1. Resolve the schema by name
//! 2. Open a form (schema initial values + caller overrides)
//! 3. Apply submitted values and validate the whole form

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::SchemaStore,
    domain::{FormReport, FormSchema, FormState, Violation},
    error::{FormguardError, FormguardResult},
};

/// Information about a schema for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    pub name: String,
    pub description: String,
    pub fields: usize,
    pub required: usize,
}

impl From<&FormSchema> for SchemaInfo {
    fn from(schema: &FormSchema) -> Self {
        Self {
            name: schema.name.clone(),
            description: schema.description.clone(),
            fields: schema.fields().len(),
            required: schema
                .fields()
                .iter()
                .filter(|(_, rules)| rules.is_required())
                .count(),
        }
    }
}

/// Main validation service.
pub struct ValidationService {
    store: Box<dyn SchemaStore>,
}

impl ValidationService {
    /// Create a new validation service over the given store.
    pub fn new(store: Box<dyn SchemaStore>) -> Self {
        Self { store }
    }

    /// Get a schema by name.
    pub fn schema(&self, name: &str) -> FormguardResult<FormSchema> {
        self.store.get(name)
    }

    /// Open a fresh form for `name`, with optional initial-value overrides.
    #[instrument(skip_all, fields(schema = %name))]
    pub fn open<I, K, V>(&self, name: &str, overrides: I) -> FormguardResult<FormState>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let schema = self.store.get(name)?;
        let form = schema.open(overrides)?;
        debug!(fields = form.len(), "form opened");
        Ok(form)
    }

    /// Validate a full submission against `name`.
    ///
    /// Fields absent from `values` keep the schema's initial value. Every
    /// field is validated, as on a submit click.
    #[instrument(skip_all, fields(schema = %name))]
    pub fn check<I, K, V>(&self, name: &str, values: I) -> FormguardResult<FormReport>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = self.open(name, Vec::<(String, String)>::new())?;
        for (field, value) in values {
            form.set_field_value(field.as_ref(), value)?;
        }

        let valid = form.validate_all();
        let report = form.report();
        info!(valid, errors = report.error_count(), "submission checked");
        Ok(report)
    }

    /// Evaluate a single value against one field of `name`.
    pub fn evaluate(
        &self,
        name: &str,
        field: &str,
        value: &str,
    ) -> FormguardResult<Option<Violation>> {
        let schema = self.store.get(name)?;
        let rules = schema.field(field).ok_or_else(|| {
            FormguardError::from(crate::domain::DomainError::UnknownField(field.to_string()))
        })?;
        Ok(rules.check(value))
    }

    /// List all available schemas, sorted by name.
    pub fn list(&self) -> FormguardResult<Vec<SchemaInfo>> {
        let mut infos: Vec<SchemaInfo> = self
            .store
            .list()?
            .iter()
            .map(SchemaInfo::from)
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockSchemaStore},
        domain::{DomainError, RuleKind, RuleSet},
    };

    fn contact() -> FormSchema {
        FormSchema::builder("contact")
            .description("Message to a sitter")
            .field(
                "email",
                RuleSet::builder().required().email().build().unwrap(),
            )
            .field(
                "message",
                RuleSet::builder().max_length(20).build().unwrap(),
            )
            .initial("message", "Hi!")
            .build()
            .unwrap()
    }

    fn service_with_contact() -> ValidationService {
        let mut store = MockSchemaStore::new();
        store
            .expect_get()
            .withf(|name: &str| name == "contact")
            .returning(|_| Ok(contact()));
        store.expect_get().returning(|name| {
            Err(ApplicationError::SchemaNotFound {
                name: name.to_string(),
            }
            .into())
        });
        store.expect_list().returning(|| Ok(vec![contact()]));
        ValidationService::new(Box::new(store))
    }

    #[test]
    fn check_valid_submission() {
        let service = service_with_contact();
        let report = service
            .check("contact", [("email", "ana@example.com")])
            .unwrap();

        assert!(report.valid);
        assert_eq!(report.fields[1].value, "Hi!");
        assert!(report.fields.iter().all(|f| f.touched));
    }

    #[test]
    fn check_reports_every_invalid_field() {
        let service = service_with_contact();
        let report = service
            .check(
                "contact",
                [("email", "nope"), ("message", "far too long for a message")],
            )
            .unwrap();

        assert!(!report.valid);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.fields[0].rule, Some(RuleKind::Email));
        assert_eq!(report.fields[1].rule, Some(RuleKind::MaxLength));
    }

    #[test]
    fn check_unknown_field_is_error() {
        let service = service_with_contact();
        let result = service.check("contact", [("phone", "123")]);
        assert!(matches!(
            result,
            Err(FormguardError::Domain(DomainError::UnknownField(_)))
        ));
    }

    #[test]
    fn missing_schema_propagates() {
        let service = service_with_contact();
        let result = service.open("booking", Vec::<(String, String)>::new());
        assert!(matches!(
            result,
            Err(FormguardError::Application(
                ApplicationError::SchemaNotFound { .. }
            ))
        ));
    }

    #[test]
    fn evaluate_single_field() {
        let service = service_with_contact();
        let violation = service.evaluate("contact", "email", "").unwrap();
        assert_eq!(violation.map(|v| v.rule), Some(RuleKind::Required));

        assert_eq!(service.evaluate("contact", "message", "ok").unwrap(), None);
        assert!(service.evaluate("contact", "nope", "").is_err());
    }

    #[test]
    fn list_summarises_schemas() {
        let service = service_with_contact();
        let infos = service.list().unwrap();
        assert_eq!(
            infos,
            vec![SchemaInfo {
                name: "contact".into(),
                description: "Message to a sitter".into(),
                fields: 2,
                required: 1,
            }]
        );
    }
}
