pub mod form_state;
pub mod report;
pub mod rule_set;
pub mod schema;

pub use form_state::FormState;
pub use report::{FieldReport, FormReport};
pub use rule_set::{CustomCheck, CustomRule, Pattern, RuleMessages, RuleSet, RuleSetBuilder, Violation};
pub use schema::{FormSchema, FormSchemaBuilder};
