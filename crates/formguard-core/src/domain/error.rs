// ============================================================================
// domain/error.rs - SCHEMA AND FORM CONSTRUCTION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Field validation failures are NOT errors: they are surfaced as per-field
/// messages on the form state. This enum only covers caller mistakes that
/// make a rule set or form unusable.
///
/// All errors are:
/// - Cloneable (forms are rebuilt from schemas)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Rule definition errors
    // ========================================================================
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid length bounds: min {min} > max {max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("unknown rule kind: {0}")]
    UnknownRuleKind(String),

    #[error("unknown custom predicate '{name}' referenced by field '{field}'")]
    UnknownPredicate { field: String, name: String },

    // ========================================================================
    // Schema / form shape errors
    // ========================================================================
    #[error("invalid field name '{name}': {reason}")]
    InvalidFieldName { name: String, reason: String },

    #[error("duplicate field in schema: {0}")]
    DuplicateField(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPattern { pattern, reason } => vec![
                format!("The pattern '{}' does not compile", pattern),
                format!("Details: {}", reason),
                "Patterns use Rust regex syntax (no look-around)".into(),
            ],
            Self::InvalidBounds { min, max } => vec![
                format!("No value can satisfy min {} and max {}", min, max),
                "Lower min_length or raise max_length".into(),
            ],
            Self::UnknownRuleKind(kind) => vec![
                format!("'{}' is not a rule kind", kind),
                "Known kinds: required, min_length, max_length, pattern, email, numeric, custom"
                    .into(),
            ],
            Self::UnknownPredicate { name, .. } => vec![
                format!("No custom predicate is registered as '{}'", name),
                "Try: formguard show <schema> to see which predicates are in use".into(),
            ],
            Self::InvalidFieldName { .. } => vec![
                "Field names must be non-empty and contain no whitespace".into(),
                "Examples: email, first_name, hourly-rate".into(),
            ],
            Self::DuplicateField(name) => {
                vec![format!("Field '{}' is declared more than once", name)]
            }
            Self::UnknownField(name) => vec![
                format!("'{}' is not part of this form", name),
                "Try: formguard show <schema> to list its fields".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPattern { .. }
            | Self::InvalidBounds { .. }
            | Self::UnknownRuleKind(_)
            | Self::InvalidFieldName { .. }
            | Self::DuplicateField(_)
            | Self::InvalidSchema(_) => ErrorCategory::Validation,
            Self::UnknownPredicate { .. } | Self::UnknownField(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
