use crate::QueryError;
use crate::Schema;
use crate::validation::FieldBindings;
use gqlengine_parser::ast::Document;

/// The result of validating one document.
#[derive(Clone, Debug)]
pub struct ValidationOutcome<'schema> {
    /// Every violation found, each tagged with the rule that found it.
    pub errors: Vec<QueryError>,

    /// Field-node to schema-field bindings. Complete for every field that
    /// passed `FieldsOnCorrectType` when `errors` is empty.
    pub bindings: FieldBindings<'schema>,
}

impl ValidationOutcome<'_> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks a parsed document against a schema.
///
/// `max_depth` bounds selection-set nesting; `0` disables the bound.
pub trait Validator: Send + Sync {
    fn validate<'schema>(
        &self,
        schema: &'schema Schema,
        document: &Document,
        max_depth: usize,
    ) -> ValidationOutcome<'schema>;
}
