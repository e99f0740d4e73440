use crate::Schema;
use crate::validation::ValidationContext;
use crate::validation::ValidationOutcome;
use crate::validation::Validator;
use crate::validation::directive_rules;
use crate::validation::field_rules;
use crate::validation::fragment_rules;
use crate::validation::max_depth;
use crate::validation::operation_rules;
use crate::validation::variable_rules;
use gqlengine_parser::ast::Document;

/// Runs the standard rule set, in a fixed order, and collects every error
/// rather than stopping at the first.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultValidator;

impl Validator for DefaultValidator {
    fn validate<'schema>(
        &self,
        schema: &'schema Schema,
        document: &Document,
        max_depth: usize,
    ) -> ValidationOutcome<'schema> {
        let mut ctx = ValidationContext::new(schema, document, max_depth);

        operation_rules::unique_operation_names(&mut ctx);
        operation_rules::lone_anonymous_operation(&mut ctx);
        operation_rules::known_operation_types(&mut ctx);

        fragment_rules::unique_fragment_names(&mut ctx);
        fragment_rules::known_fragment_names(&mut ctx);
        fragment_rules::no_fragment_cycles(&mut ctx);
        fragment_rules::no_unused_fragments(&mut ctx);
        fragment_rules::fragment_type_conditions(&mut ctx);

        variable_rules::unique_variable_names(&mut ctx);
        variable_rules::variable_types(&mut ctx);
        variable_rules::no_undefined_variables(&mut ctx);
        variable_rules::no_unused_variables(&mut ctx);

        field_rules::check_fields(&mut ctx);
        variable_rules::variables_in_allowed_position(&mut ctx);
        directive_rules::known_directives(&mut ctx);
        max_depth::max_depth(&mut ctx);

        ctx.into_outcome()
    }
}
