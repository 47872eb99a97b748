//! Rule evaluation.
//!
//! A value is checked against a [`RuleSet`] in the fixed order of
//! [`RuleKind`] and evaluation stops at the first failure. Length, pattern,
//! email and numeric checks only apply to non-empty values; an empty optional
//! field is valid unless it is `required`. The custom predicate always runs
//! when reached and its verdict is final.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{
    entities::rule_set::{RuleSet, Violation},
    value_objects::RuleKind,
};

pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required";
pub const DEFAULT_MIN_LENGTH_MESSAGE: &str = "Must be at least {min} characters";
pub const DEFAULT_MAX_LENGTH_MESSAGE: &str = "Must be at most {max} characters";
pub const DEFAULT_PATTERN_MESSAGE: &str = "Invalid format";
pub const DEFAULT_EMAIL_MESSAGE: &str = "Invalid email address";
pub const DEFAULT_NUMERIC_MESSAGE: &str = "Must be a number";

/// Evaluate `value` against optional rules.
///
/// A field with no rule set is always valid.
pub fn evaluate(rules: Option<&RuleSet>, value: &str) -> Option<String> {
    rules.and_then(|rules| rules.evaluate(value))
}

/// First violated rule for `value`.
pub fn check(rules: &RuleSet, value: &str) -> Option<Violation> {
    if rules.required && value.trim().is_empty() {
        return Some(violation(rules, RuleKind::Required));
    }

    if !value.is_empty() {
        let length = char_len(value);

        if let Some(min) = rules.min_length {
            if length < min {
                return Some(violation(rules, RuleKind::MinLength));
            }
        }

        if let Some(max) = rules.max_length {
            if length > max {
                return Some(violation(rules, RuleKind::MaxLength));
            }
        }

        if let Some(pattern) = &rules.pattern {
            if !pattern.is_match(value) {
                return Some(violation(rules, RuleKind::Pattern));
            }
        }

        if rules.email && !is_email(value) {
            return Some(violation(rules, RuleKind::Email));
        }

        if rules.numeric && !is_numeric(value) {
            return Some(violation(rules, RuleKind::Numeric));
        }
    }

    rules
        .custom
        .as_ref()
        .and_then(|custom| custom.call(value))
        .map(|message| Violation::new(RuleKind::Custom, message))
}

/// Permissive `local@domain.tld` shape check.
///
/// Neither the TLD length nor consecutive dots are checked.
pub fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
        .is_match(value)
}

/// Whether `value` reads as a decimal number.
///
/// Surrounding whitespace is ignored and a blank value counts as zero.
/// `NaN` and the infinities are rejected.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Length in characters, not bytes.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn violation(rules: &RuleSet, kind: RuleKind) -> Violation {
    let template = rules.messages.get(kind).unwrap_or(match kind {
        RuleKind::Required => DEFAULT_REQUIRED_MESSAGE,
        RuleKind::MinLength => DEFAULT_MIN_LENGTH_MESSAGE,
        RuleKind::MaxLength => DEFAULT_MAX_LENGTH_MESSAGE,
        RuleKind::Pattern => DEFAULT_PATTERN_MESSAGE,
        RuleKind::Email => DEFAULT_EMAIL_MESSAGE,
        RuleKind::Numeric => DEFAULT_NUMERIC_MESSAGE,
        RuleKind::Custom => "",
    });

    let mut message = template.to_string();
    if let Some(min) = rules.min_length {
        message = message.replace("{min}", &min.to_string());
    }
    if let Some(max) = rules.max_length {
        message = message.replace("{max}", &max.to_string());
    }
    Violation::new(kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::rule_set::CustomRule;

    fn rules(builder: crate::domain::entities::rule_set::RuleSetBuilder) -> RuleSet {
        builder.build().unwrap()
    }

    // ========================================================================
    // required
    // ========================================================================

    #[test]
    fn required_rejects_empty_and_blank() {
        let r = rules(RuleSet::builder().required());
        assert_eq!(r.evaluate("").as_deref(), Some(DEFAULT_REQUIRED_MESSAGE));
        assert_eq!(r.evaluate("   ").as_deref(), Some(DEFAULT_REQUIRED_MESSAGE));
        assert_eq!(r.evaluate("\t\n").as_deref(), Some(DEFAULT_REQUIRED_MESSAGE));
    }

    #[test]
    fn required_accepts_any_non_blank_value() {
        let r = rules(RuleSet::builder().required());
        for value in ["a", " a ", "0", "false"] {
            assert_eq!(r.evaluate(value), None, "value {value:?}");
        }
    }

    // ========================================================================
    // lengths
    // ========================================================================

    #[test]
    fn min_length_boundary() {
        let r = rules(RuleSet::builder().min_length(3));
        assert_eq!(
            r.evaluate("ab").as_deref(),
            Some("Must be at least 3 characters")
        );
        assert_eq!(r.evaluate("abc"), None);
    }

    #[test]
    fn max_length_boundary() {
        let r = rules(RuleSet::builder().max_length(5));
        assert_eq!(
            r.evaluate("abcdef").as_deref(),
            Some("Must be at most 5 characters")
        );
        assert_eq!(r.evaluate("abcde"), None);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let r = rules(RuleSet::builder().min_length(3).max_length(3));
        assert_eq!(r.evaluate("ção"), None);
        assert_eq!(r.evaluate("çã").map(|_| ()), Some(()));
    }

    #[test]
    fn empty_optional_value_skips_length_checks() {
        let r = rules(RuleSet::builder().min_length(3));
        assert_eq!(r.evaluate(""), None);
    }

    #[test]
    fn whitespace_counts_towards_length() {
        let r = rules(RuleSet::builder().min_length(2));
        assert_eq!(r.evaluate("  "), None);
    }

    // ========================================================================
    // pattern / email / numeric
    // ========================================================================

    #[test]
    fn pattern_mismatch_is_invalid_format() {
        let r = rules(RuleSet::builder().pattern(r"^\d{5}-\d{3}$"));
        assert_eq!(r.evaluate("01310-100"), None);
        assert_eq!(r.evaluate("01310100").as_deref(), Some("Invalid format"));
        assert_eq!(r.evaluate(""), None);
    }

    #[test]
    fn pattern_is_unanchored() {
        let r = rules(RuleSet::builder().pattern(r"\d"));
        assert_eq!(r.evaluate("abc1"), None);
    }

    #[test]
    fn email_accepts_plain_address() {
        let r = rules(RuleSet::builder().email());
        assert_eq!(r.evaluate("user@example.com"), None);
        assert_eq!(
            r.evaluate("not-an-email").as_deref(),
            Some("Invalid email address")
        );
        assert_eq!(r.evaluate(""), None);
    }

    #[test]
    fn email_check_is_permissive() {
        assert!(is_email("a@b.c"));
        assert!(is_email("first..last@mail..com"));
        assert!(!is_email("a b@c.d"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.c"));
    }

    #[test]
    fn numeric_accepts_integers_and_decimals() {
        let r = rules(RuleSet::builder().numeric());
        assert_eq!(r.evaluate("42"), None);
        assert_eq!(r.evaluate("-3.5"), None);
        assert_eq!(r.evaluate(" 7 "), None);
        assert_eq!(r.evaluate("1e3"), None);
        assert_eq!(r.evaluate("abc").as_deref(), Some("Must be a number"));
        assert_eq!(r.evaluate("NaN").as_deref(), Some("Must be a number"));
        assert_eq!(r.evaluate("12abc").as_deref(), Some("Must be a number"));
    }

    #[test]
    fn numeric_rejects_infinities() {
        let r = rules(RuleSet::builder().numeric());
        for value in ["inf", "-inf", "infinity", "+Infinity", "1e400"] {
            assert_eq!(
                r.check(value).map(|v| v.rule),
                Some(RuleKind::Numeric),
                "{value}"
            );
        }
    }

    #[test]
    fn numeric_blank_value_counts_as_zero() {
        assert!(is_numeric("   "));
    }

    // ========================================================================
    // ordering
    // ========================================================================

    #[test]
    fn first_failure_wins() {
        let r = rules(RuleSet::builder().required().min_length(5).email());
        assert_eq!(r.check("").unwrap().rule, RuleKind::Required);
        assert_eq!(r.check("a@b").unwrap().rule, RuleKind::MinLength);
        assert_eq!(r.check("abcdef").unwrap().rule, RuleKind::Email);
    }

    #[test]
    fn pattern_shadows_email() {
        let r = rules(RuleSet::builder().pattern("^x").email());
        assert_eq!(r.check("nope").unwrap().rule, RuleKind::Pattern);
        assert_eq!(r.check("xnope").unwrap().rule, RuleKind::Email);
    }

    #[test]
    fn custom_runs_last() {
        let r = rules(
            RuleSet::builder()
                .min_length(2)
                .check(|v| (v != "ok").then(|| "Must be ok".to_string())),
        );
        assert_eq!(r.check("x").unwrap().rule, RuleKind::MinLength);
        assert_eq!(r.evaluate("no").as_deref(), Some("Must be ok"));
        assert_eq!(r.evaluate("ok"), None);
    }

    #[test]
    fn custom_sees_empty_values() {
        let r = rules(RuleSet::builder().custom(CustomRule::new(|v| {
            v.is_empty().then(|| "empty".to_string())
        })));
        assert_eq!(r.evaluate("").as_deref(), Some("empty"));
    }

    // ========================================================================
    // messages
    // ========================================================================

    #[test]
    fn message_overrides_interpolate_bounds() {
        let r = rules(
            RuleSet::builder()
                .min_length(8)
                .max_length(64)
                .message(RuleKind::MinLength, "Use {min} to {max} characters"),
        );
        assert_eq!(
            r.evaluate("short").as_deref(),
            Some("Use 8 to 64 characters")
        );
    }

    #[test]
    fn evaluate_without_rules_is_valid() {
        assert_eq!(evaluate(None, ""), None);
        assert_eq!(evaluate(None, "whatever"), None);
    }
}
