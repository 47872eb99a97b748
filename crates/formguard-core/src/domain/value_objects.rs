//! Domain value objects: RuleKind, FieldName.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Evaluation logic lives in `evaluation.rs`; this file only defines the
//! types, their string representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RuleKind ─────────────────────────────────────────────────────────────────

/// One of the built-in checks a field can be configured with.
///
/// Declaration order is evaluation order: when several rules fail for the
/// same value, the one with the lowest [`RuleKind::priority`] is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    Numeric,
    Custom,
}

impl RuleKind {
    /// Every kind, in evaluation order.
    pub const ALL: [RuleKind; 7] = [
        Self::Required,
        Self::MinLength,
        Self::MaxLength,
        Self::Pattern,
        Self::Email,
        Self::Numeric,
        Self::Custom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::Numeric => "numeric",
            Self::Custom => "custom",
        }
    }

    /// Position in the short-circuit order (0 runs first).
    pub const fn priority(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "required" => Ok(Self::Required),
            "min_length" | "minlength" | "min" => Ok(Self::MinLength),
            "max_length" | "maxlength" | "max" => Ok(Self::MaxLength),
            "pattern" | "regex" => Ok(Self::Pattern),
            "email" => Ok(Self::Email),
            "numeric" | "number" => Ok(Self::Numeric),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::UnknownRuleKind(other.to_string())),
        }
    }
}

// ── FieldName ────────────────────────────────────────────────────────────────

/// Key of a form field.
///
/// Non-empty and free of whitespace, so it can be used verbatim as a CLI
/// `--set key=value` key and as a TOML table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidFieldName {
                name,
                reason: "name is empty".into(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidFieldName {
                name,
                reason: "name contains whitespace".into(),
            });
        }
        if name.contains('=') {
            return Err(DomainError::InvalidFieldName {
                name,
                reason: "name contains '='".into(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FieldName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FieldName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
