//! Live state of one form instance.
//!
//! A [`FormState`] owns every field's value, touched flag and current error,
//! keyed by field name in declaration order. Each field is a single record,
//! so the value, error and touched views always share one key set.
//!
//! Errors only become visible once a field is touched: a value change on an
//! untouched field is stored silently, a blur (`mark_field_touched`)
//! evaluates it, and `validate_all` touches and evaluates everything at once.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::domain::{
    entities::{
        report::{FieldReport, FormReport},
        rule_set::{RuleSet, Violation},
    },
    error::DomainError,
    value_objects::FieldName,
};

#[derive(Debug, Clone)]
struct Field {
    name: FieldName,
    rules: Option<RuleSet>,
    initial: String,
    value: String,
    touched: bool,
    violation: Option<Violation>,
}

impl Field {
    fn evaluate(&self) -> Option<Violation> {
        self.rules.as_ref().and_then(|rules| rules.check(&self.value))
    }

    /// Store a fresh evaluation, logging only actual transitions.
    fn refresh(&mut self) {
        let next = self.evaluate();
        if next != self.violation {
            debug!(
                field = %self.name,
                error = next.as_ref().map(|v| v.message.as_str()).unwrap_or("none"),
                "field error changed"
            );
        }
        self.violation = next;
    }
}

/// Values, errors and touched flags for one form.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<Field>,
    index: HashMap<FieldName, usize>,
}

impl FormState {
    /// Create a form from initial values and per-field rules.
    ///
    /// The form's fields are the union of both key sets: fields with rules
    /// but no initial value start empty, fields with an initial value but no
    /// rules are always valid. Fields appear in rule order, followed by
    /// value-only fields in the order given. Later duplicates win.
    pub fn new<V, R>(initial: V, rules: R) -> Self
    where
        V: IntoIterator<Item = (FieldName, String)>,
        R: IntoIterator<Item = (FieldName, RuleSet)>,
    {
        let mut form = Self {
            fields: Vec::new(),
            index: HashMap::new(),
        };

        for (name, rule_set) in rules {
            form.slot(name).rules = Some(rule_set);
        }
        for (name, value) in initial {
            let field = form.slot(name);
            field.initial = value.clone();
            field.value = value;
        }

        form
    }

    fn slot(&mut self, name: FieldName) -> &mut Field {
        let idx = match self.index.get(&name) {
            Some(&idx) => idx,
            None => {
                self.fields.push(Field {
                    name: name.clone(),
                    rules: None,
                    initial: String::new(),
                    value: String::new(),
                    touched: false,
                    violation: None,
                });
                self.index.insert(name, self.fields.len() - 1);
                self.fields.len() - 1
            }
        };
        &mut self.fields[idx]
    }

    fn field(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut Field, DomainError> {
        match self.index.get(name) {
            Some(&idx) => Ok(&mut self.fields[idx]),
            None => Err(DomainError::UnknownField(name.to_string())),
        }
    }

    // ── Operations ──────────────────────────────────────────────────────────

    /// Evaluate `value` against the rules configured for `field`.
    ///
    /// Pure: the form is not modified. Unknown fields and fields without
    /// rules are always valid.
    pub fn evaluate(&self, field: &str, value: &str) -> Option<String> {
        self.field(field)
            .and_then(|f| f.rules.as_ref())
            .and_then(|rules| rules.evaluate(value))
    }

    /// Store a new value for `field`.
    ///
    /// A touched field is re-evaluated immediately so its error clears or
    /// reappears as the user types; an untouched field keeps no error.
    pub fn set_field_value(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let f = self.field_mut(field)?;
        f.value = value.into();
        trace!(field = %f.name, touched = f.touched, "value changed");
        if f.touched {
            f.refresh();
        }
        Ok(())
    }

    /// Mark `field` as touched (it lost focus) and evaluate its value.
    pub fn mark_field_touched(&mut self, field: &str) -> Result<(), DomainError> {
        let f = self.field_mut(field)?;
        f.touched = true;
        f.refresh();
        Ok(())
    }

    /// Evaluate every field, touch them all, and report whether the whole
    /// form is valid.
    #[instrument(skip_all, fields(fields = self.fields.len()))]
    pub fn validate_all(&mut self) -> bool {
        for field in &mut self.fields {
            field.touched = true;
            field.refresh();
        }
        let invalid = self.fields.iter().filter(|f| f.violation.is_some()).count();
        debug!(invalid, "form validated");
        invalid == 0
    }

    /// Restore the initial values and clear every error and touched flag.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clone_from(&field.initial);
            field.touched = false;
            field.violation = None;
        }
        debug!(fields = self.fields.len(), "form reset");
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().map(|f| &f.name)
    }

    pub fn rules(&self, field: &str) -> Option<&RuleSet> {
        self.field(field).and_then(|f| f.rules.as_ref())
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.field(field).map(|f| f.value.as_str())
    }

    pub fn initial_value(&self, field: &str) -> Option<&str> {
        self.field(field).map(|f| f.initial.as_str())
    }

    /// Current visible error for `field`.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.field(field)
            .and_then(|f| f.violation.as_ref())
            .map(|v| v.message.as_str())
    }

    pub fn violation(&self, field: &str) -> Option<&Violation> {
        self.field(field).and_then(|f| f.violation.as_ref())
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.field(field).is_some_and(|f| f.touched)
    }

    /// Every field's current value.
    pub fn values(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields.iter().map(|f| (&f.name, f.value.as_str()))
    }

    /// Fields that currently show an error, with the message.
    pub fn errors(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.violation.as_ref().map(|v| (&f.name, v.message.as_str())))
    }

    /// Every field's touched flag.
    pub fn touched(&self) -> impl Iterator<Item = (&FieldName, bool)> {
        self.fields.iter().map(|f| (&f.name, f.touched))
    }

    /// First field (in declaration order) showing an error.
    pub fn first_error(&self) -> Option<(&FieldName, &str)> {
        self.errors().next()
    }

    /// `true` while no field shows an error. Untouched invalid fields do not
    /// count; call [`FormState::validate_all`] for a full verdict.
    pub fn is_valid(&self) -> bool {
        self.first_error().is_none()
    }

    /// `true` if any value differs from its initial value.
    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|f| f.value != f.initial)
    }

    /// Snapshot of the form for display or serialization.
    pub fn report(&self) -> FormReport {
        FormReport {
            valid: self.is_valid(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldReport {
                    name: f.name.to_string(),
                    value: f.value.clone(),
                    touched: f.touched,
                    rule: f.violation.as_ref().map(|v| v.rule),
                    error: f.violation.as_ref().map(|v| v.message.clone()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::value_objects::RuleKind;

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    fn signup() -> FormState {
        FormState::new(
            [
                (name("email"), String::new()),
                (name("password"), String::new()),
            ],
            [
                (
                    name("email"),
                    RuleSet::builder().required().email().build().unwrap(),
                ),
                (
                    name("password"),
                    RuleSet::builder().required().min_length(8).build().unwrap(),
                ),
            ],
        )
    }

    fn error_map(form: &FormState) -> BTreeMap<String, String> {
        form.errors()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn key_set_is_union_of_rules_and_values() {
        let form = FormState::new(
            [(name("nickname"), "bia".to_string())],
            [(name("email"), RuleSet::default())],
        );
        let names: Vec<&str> = form.field_names().map(FieldName::as_str).collect();
        assert_eq!(names, vec!["email", "nickname"]);
        assert_eq!(form.value("email"), Some(""));
        assert_eq!(form.value("nickname"), Some("bia"));
        assert_eq!(form.values().count(), form.touched().count());
    }

    #[test]
    fn set_value_on_untouched_field_stores_silently() {
        let mut form = signup();
        form.set_field_value("email", "not-an-email").unwrap();

        assert_eq!(form.value("email"), Some("not-an-email"));
        assert_eq!(form.error("email"), None);
        assert!(!form.is_touched("email"));
    }

    #[test]
    fn touched_field_revalidates_live() {
        let mut form = signup();
        form.mark_field_touched("email").unwrap();
        assert_eq!(form.error("email"), Some("This field is required"));

        form.set_field_value("email", "bad").unwrap();
        assert_eq!(form.error("email"), Some("Invalid email address"));

        form.set_field_value("email", "ana@example.com").unwrap();
        assert_eq!(form.error("email"), None);
    }

    #[test]
    fn mark_touched_evaluates_current_value() {
        let mut form = signup();
        form.set_field_value("password", "short").unwrap();
        form.mark_field_touched("password").unwrap();

        assert!(form.is_touched("password"));
        assert_eq!(
            form.violation("password").map(|v| v.rule),
            Some(RuleKind::MinLength)
        );
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut form = signup();
        assert_eq!(
            form.set_field_value("phone", "123"),
            Err(DomainError::UnknownField("phone".into()))
        );
        assert!(form.mark_field_touched("phone").is_err());
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn evaluate_is_pure() {
        let form = signup();
        assert_eq!(
            form.evaluate("email", "x").as_deref(),
            Some("Invalid email address")
        );
        assert_eq!(form.evaluate("unknown", ""), None);
        assert_eq!(form.error("email"), None);
    }

    #[test]
    fn validate_all_valid_form() {
        let mut form = signup();
        form.set_field_value("email", "ana@example.com").unwrap();
        form.set_field_value("password", "correct horse").unwrap();

        assert!(form.validate_all());
        assert_eq!(form.errors().count(), 0);
        assert!(form.touched().all(|(_, t)| t));
    }

    #[test]
    fn validate_all_with_one_invalid_field() {
        let mut form = signup();
        form.set_field_value("email", "ana@example.com").unwrap();

        assert!(!form.validate_all());
        assert!(form.touched().all(|(_, t)| t));
        assert_eq!(
            error_map(&form),
            BTreeMap::from([("password".to_string(), "This field is required".to_string())])
        );
        assert_eq!(form.first_error().map(|(n, _)| n.as_str()), Some("password"));
    }

    #[test]
    fn validate_all_is_idempotent() {
        let mut form = signup();
        form.set_field_value("email", "nope").unwrap();

        form.validate_all();
        let first = error_map(&form);
        form.validate_all();
        assert_eq!(error_map(&form), first);
    }

    #[test]
    fn reset_restores_pristine_state() {
        let mut form = FormState::new(
            [(name("city"), "Recife".to_string())],
            [(name("city"), RuleSet::builder().required().build().unwrap())],
        );
        form.set_field_value("city", "").unwrap();
        assert!(form.is_dirty());
        assert!(!form.validate_all());

        form.reset();
        assert_eq!(form.value("city"), Some("Recife"));
        assert_eq!(form.errors().count(), 0);
        assert!(form.touched().all(|(_, t)| !t));
        assert!(!form.is_dirty());
    }

    #[test]
    fn field_without_rules_is_always_valid() {
        let mut form = FormState::new([(name("notes"), String::new())], []);
        form.mark_field_touched("notes").unwrap();
        assert!(form.validate_all());
    }

    #[test]
    fn report_mirrors_state() {
        let mut form = signup();
        form.set_field_value("email", "ana@example.com").unwrap();
        form.validate_all();

        let report = form.report();
        assert!(!report.valid);
        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.fields[0].error, None);
        assert_eq!(report.fields[1].rule, Some(RuleKind::Required));
    }
}
