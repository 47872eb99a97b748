//! Serializable snapshot of a form, used by the CLI's human and JSON output.

use serde::Serialize;

use crate::domain::value_objects::RuleKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub valid: bool,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub value: String,
    pub touched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormReport {
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| f.error.is_some())
    }

    pub fn error_count(&self) -> usize {
        self.invalid_fields().count()
    }
}
