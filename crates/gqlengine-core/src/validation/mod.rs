//! Request-document validation against a [`Schema`](crate::Schema).
//!
//! Validation also binds every field node to its schema field. The engine
//! never looks fields up by name again; it reads the [`FieldBindings`] side
//! table produced here.

mod argument_rules;
mod default_validator;
mod directive_rules;
mod field_bindings;
mod field_rules;
mod fragment_rules;
mod max_depth;
mod operation_rules;
mod validation_context;
mod validator;
mod variable_rules;

pub use default_validator::DefaultValidator;
pub use field_bindings::FieldBinding;
pub use field_bindings::FieldBindings;
use validation_context::ValidationContext;
pub use validator::ValidationOutcome;
pub use validator::Validator;

#[cfg(test)]
mod tests;
