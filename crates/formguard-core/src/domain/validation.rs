use crate::domain::{
    entities::{FormSchema, RuleSet},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entry point for adapters that assemble rule sets and schemas from
/// external sources; all checks delegate to the entities themselves.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_rules(rules: &RuleSet) -> Result<(), DomainError> {
        rules.validate()
    }

    pub fn validate_schema(schema: &FormSchema) -> Result<(), DomainError> {
        schema.validate()
    }
}
