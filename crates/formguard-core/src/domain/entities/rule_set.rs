//! Per-field rule specification.
//!
//! A [`RuleSet`] is the declarative set of constraints configured for one
//! field. It is immutable once built; evaluation lives in
//! [`crate::domain::evaluation`].

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, evaluation, value_objects::RuleKind};

// ── Violation ────────────────────────────────────────────────────────────────

/// The first rule a value failed, with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: RuleKind,
    pub message: String,
}

impl Violation {
    pub fn new(rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ── Pattern ──────────────────────────────────────────────────────────────────

/// A compiled regular expression, compared by its source text.
///
/// Matching is unanchored: the value passes if the expression matches
/// anywhere in it. Use `^...$` for whole-value matches.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self, DomainError> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| DomainError::InvalidPattern {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

// ── CustomRule ───────────────────────────────────────────────────────────────

/// Signature of a caller-supplied check: `Some(message)` rejects the value.
pub type CustomCheck = dyn Fn(&str) -> Option<String> + Send + Sync;

/// A caller-supplied predicate, run after every built-in check.
///
/// The optional name is what schema files refer to (`custom = "adult_age"`)
/// and what `formguard show` prints; closures built in code may stay
/// anonymous.
#[derive(Clone)]
pub struct CustomRule {
    name: Option<String>,
    check: Arc<CustomCheck>,
}

impl CustomRule {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    pub fn named<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, value: &str) -> Option<String> {
        (self.check)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name.as_deref().unwrap_or("<closure>"))
            .finish_non_exhaustive()
    }
}

// ── RuleMessages ─────────────────────────────────────────────────────────────

/// Per-field overrides for the default error messages.
///
/// `{min}` and `{max}` are substituted in the length messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleMessages {
    pub required: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub pattern: Option<String>,
    pub email: Option<String>,
    pub numeric: Option<String>,
}

impl RuleMessages {
    /// Override for `kind`, if any. Custom rules produce their own message.
    pub fn get(&self, kind: RuleKind) -> Option<&str> {
        match kind {
            RuleKind::Required => self.required.as_deref(),
            RuleKind::MinLength => self.min_length.as_deref(),
            RuleKind::MaxLength => self.max_length.as_deref(),
            RuleKind::Pattern => self.pattern.as_deref(),
            RuleKind::Email => self.email.as_deref(),
            RuleKind::Numeric => self.numeric.as_deref(),
            RuleKind::Custom => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── RuleSet ──────────────────────────────────────────────────────────────────

/// Constraints configured for a single field.
///
/// Every rule is optional; an empty `RuleSet` accepts any value.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub(crate) required: bool,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) email: bool,
    pub(crate) numeric: bool,
    pub(crate) custom: Option<CustomRule>,
    pub(crate) messages: RuleMessages,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn is_email(&self) -> bool {
        self.email
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn custom(&self) -> Option<&CustomRule> {
        self.custom.as_ref()
    }

    pub fn messages(&self) -> &RuleMessages {
        &self.messages
    }

    /// Configured rule kinds, in evaluation order.
    pub fn kinds(&self) -> Vec<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                RuleKind::Required => self.required,
                RuleKind::MinLength => self.min_length.is_some(),
                RuleKind::MaxLength => self.max_length.is_some(),
                RuleKind::Pattern => self.pattern.is_some(),
                RuleKind::Email => self.email,
                RuleKind::Numeric => self.numeric,
                RuleKind::Custom => self.custom.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    /// First failing rule for `value`, if any.
    pub fn check(&self, value: &str) -> Option<Violation> {
        evaluation::check(self, value)
    }

    /// Message of the first failing rule for `value`, if any.
    pub fn evaluate(&self, value: &str) -> Option<String> {
        self.check(value).map(|v| v.message)
    }

    /// Reject rule combinations no value could satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(DomainError::InvalidBounds { min, max });
            }
        }
        Ok(())
    }

    /// Short human-readable description, e.g. `required, min_length=3`.
    pub fn describe(&self) -> String {
        self.kinds()
            .into_iter()
            .map(|kind| match kind {
                RuleKind::MinLength => format!("{kind}={}", self.min_length.unwrap_or_default()),
                RuleKind::MaxLength => format!("{kind}={}", self.max_length.unwrap_or_default()),
                RuleKind::Pattern => format!(
                    "{kind}=/{}/",
                    self.pattern.as_ref().map(Pattern::as_str).unwrap_or_default()
                ),
                RuleKind::Custom => match self.custom.as_ref().and_then(CustomRule::name) {
                    Some(name) => format!("{kind}={name}"),
                    None => kind.to_string(),
                },
                _ => kind.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Fluent builder for [`RuleSet`].
///
/// Patterns are compiled and bounds checked in [`RuleSetBuilder::build`].
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    email: bool,
    numeric: bool,
    custom: Option<CustomRule>,
    messages: RuleMessages,
}

impl RuleSetBuilder {
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn custom(mut self, rule: CustomRule) -> Self {
        self.custom = Some(rule);
        self
    }

    /// Shorthand for an anonymous [`CustomRule`].
    pub fn check<F>(self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom(CustomRule::new(check))
    }

    pub fn messages(mut self, messages: RuleMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Override the message reported when `kind` fails.
    ///
    /// Overrides for [`RuleKind::Custom`] are ignored; the predicate supplies
    /// its own message.
    pub fn message(mut self, kind: RuleKind, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match kind {
            RuleKind::Required => self.messages.required = message,
            RuleKind::MinLength => self.messages.min_length = message,
            RuleKind::MaxLength => self.messages.max_length = message,
            RuleKind::Pattern => self.messages.pattern = message,
            RuleKind::Email => self.messages.email = message,
            RuleKind::Numeric => self.messages.numeric = message,
            RuleKind::Custom => {}
        }
        self
    }

    pub fn build(self) -> Result<RuleSet, DomainError> {
        let pattern = self.pattern.map(Pattern::new).transpose()?;
        let rules = RuleSet {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            email: self.email,
            numeric: self.numeric,
            custom: self.custom,
            messages: self.messages,
        };
        rules.validate()?;
        Ok(rules)
    }
}
