//! Named custom predicates.
//!
//! Schema files cannot carry closures, so a field's `custom = "name"` is
//! resolved against a [`PredicateRegistry`] when the schema is loaded. The
//! built-in predicates cover the checks the booking app's forms need beyond
//! the declarative rules.
//!
//! Predicates that expect a number ignore values that do not parse: pair
//! them with `numeric = true` so format errors are reported first.

use std::collections::BTreeMap;

use formguard_core::domain::CustomRule;

/// Minimum age for a sitter or account holder.
pub const ADULT_AGE: f64 = 18.0;

/// Lookup table from predicate name to rule.
#[derive(Debug, Clone, Default)]
pub struct PredicateRegistry {
    rules: BTreeMap<String, CustomRule>,
}

impl PredicateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in predicates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("adult_age", adult_age);
        registry.register("hourly_rate", hourly_rate);
        registry.register("phone", phone);
        registry.register("no_digits", no_digits);
        registry.register("strong_password", strong_password);
        registry
    }

    /// Register (or replace) a predicate under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let name = name.into();
        self.rules
            .insert(name.clone(), CustomRule::named(name, check));
    }

    pub fn get(&self, name: &str) -> Option<CustomRule> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

const NOT_FINITE: &str = "Must be a finite number";

/// `None` when the value is not a number at all; infinities are returned.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn adult_age(value: &str) -> Option<String> {
    match parse_number(value) {
        Some(age) if !age.is_finite() => Some(NOT_FINITE.into()),
        Some(age) if age < ADULT_AGE => Some(format!("Must be at least {ADULT_AGE} years old")),
        _ => None,
    }
}

/// Positive amount written in plain decimal notation, cents at most.
fn hourly_rate(value: &str) -> Option<String> {
    let rate = parse_number(value)?;
    if !rate.is_finite() {
        return Some(NOT_FINITE.into());
    }
    if rate <= 0.0 {
        return Some("Must be greater than zero".into());
    }

    let text = value.trim();
    if text.contains(['e', 'E']) {
        return Some("Use plain decimal notation".into());
    }
    // Trailing zeros do not add precision: 25.500 is 25.5.
    let decimals = text
        .split_once('.')
        .map_or(0, |(_, frac)| frac.trim_end_matches('0').len());
    (decimals > 2).then(|| "Use at most two decimal places".into())
}

fn phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (!allowed || !(8..=15).contains(&digits)).then(|| "Invalid phone number".into())
}

fn no_digits(value: &str) -> Option<String> {
    value
        .chars()
        .any(|c| c.is_ascii_digit())
        .then(|| "Must not contain digits".into())
}

fn strong_password(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let has_letter = value.chars().any(char::is_alphabetic);
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    (!(has_letter && has_digit)).then(|| "Must contain a letter and a digit".into())
}
