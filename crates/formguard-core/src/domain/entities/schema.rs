//! Named form definitions.
//!
//! A [`FormSchema`] is a rule specification with a name and default initial
//! values. Schemas are what stores hold and what the CLI refers to by name;
//! [`FormSchema::open`] turns one into a live [`FormState`].

use std::collections::HashSet;

use crate::domain::{
    entities::{form_state::FormState, rule_set::RuleSet},
    error::DomainError,
    value_objects::FieldName,
};

#[derive(Debug, Clone)]
pub struct FormSchema {
    pub name: String,
    pub description: String,
    fields: Vec<(FieldName, RuleSet)>,
    initial: Vec<(FieldName, String)>,
}

impl FormSchema {
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
            initial: Vec::new(),
        }
    }

    /// Declared fields in order, with their rules.
    pub fn fields(&self) -> &[(FieldName, RuleSet)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&RuleSet> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, rules)| rules)
    }

    pub fn initial_value(&self, name: &str) -> Option<&str> {
        self.initial
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Create a fresh form, applying `overrides` on top of the schema's own
    /// initial values. Overrides become the values `reset` returns to.
    pub fn open<I, K, V>(&self, overrides: I) -> Result<FormState, DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut initial = self.initial.clone();
        for (key, value) in overrides {
            let key = key.as_ref();
            let name = self
                .fields
                .iter()
                .map(|(n, _)| n)
                .find(|n| n.as_str() == key)
                .ok_or_else(|| DomainError::UnknownField(key.to_string()))?;
            initial.push((name.clone(), value.into()));
        }

        Ok(FormState::new(initial, self.fields.iter().cloned()))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidSchema("schema name is empty".into()));
        }
        if self.fields.is_empty() {
            return Err(DomainError::InvalidSchema(format!(
                "schema '{}' declares no fields",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for (name, rules) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(DomainError::DuplicateField(name.to_string()));
            }
            rules.validate()?;
        }

        for (name, _) in &self.initial {
            if !seen.contains(name.as_str()) {
                return Err(DomainError::InvalidSchema(format!(
                    "initial value for undeclared field '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`FormSchema`]; names are checked in [`FormSchemaBuilder::build`].
#[derive(Debug)]
pub struct FormSchemaBuilder {
    name: String,
    description: String,
    fields: Vec<(String, RuleSet)>,
    initial: Vec<(String, String)>,
}

impl FormSchemaBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.fields.push((name.into(), rules));
        self
    }

    pub fn initial(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<FormSchema, DomainError> {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, rules)| Ok((FieldName::new(name)?, rules)))
            .collect::<Result<Vec<_>, DomainError>>()?;
        let initial = self
            .initial
            .into_iter()
            .map(|(name, value)| Ok((FieldName::new(name)?, value)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        let schema = FormSchema {
            name: self.name,
            description: self.description,
            fields,
            initial,
        };
        schema.validate()?;
        Ok(schema)
    }
}
