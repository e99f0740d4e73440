use crate::execution::Executor;
use gqlengine_core::coercion::coerce_argument_value;
use gqlengine_core::types::TypeAnnotation;
use gqlengine_parser::ast;
use gqlengine_parser::ast::Selection;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Fields of one selection set grouped by response key, in the order each
/// key first appears.
pub(super) type CollectedFields<'a> = IndexMap<&'a str, Vec<&'a ast::Field>>;

impl<'a> Executor<'a> {
    /// Flattens `selection_sets` for an object of type `object_type`,
    /// expanding fragments whose type condition applies and dropping
    /// selections excluded by `@skip` or `@include`.
    pub(super) fn collect_fields(
        &self,
        object_type: &str,
        selection_sets: &[&'a [Selection]],
    ) -> CollectedFields<'a> {
        let mut collected = CollectedFields::new();
        let mut visited_fragments = HashSet::new();
        for selections in selection_sets {
            self.collect_into(object_type, selections, &mut collected, &mut visited_fragments);
        }
        collected
    }

    fn collect_into(
        &self,
        object_type: &str,
        selections: &'a [Selection],
        collected: &mut CollectedFields<'a>,
        visited_fragments: &mut HashSet<&'a str>,
    ) {
        for selection in selections {
            if !self.should_include(selection.directives()) {
                continue;
            }
            match selection {
                Selection::Field(field) =>
                    collected.entry(field.response_key()).or_default().push(field),

                Selection::InlineFragment(inline) => {
                    let applies = inline
                        .type_condition
                        .as_ref()
                        .is_none_or(|cond| self.type_condition_applies(cond.as_str(), object_type));
                    if applies {
                        self.collect_into(object_type, &inline.selections, collected, visited_fragments);
                    }
                },

                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    if !visited_fragments.insert(name) {
                        continue;
                    }
                    let Some(fragment) = self.document.fragment(name) else {
                        continue;
                    };
                    if self.type_condition_applies(fragment.type_condition.as_str(), object_type) {
                        self.collect_into(object_type, &fragment.selections, collected, visited_fragments);
                    }
                },
            }
        }
    }

    fn type_condition_applies(&self, condition: &str, object_type: &str) -> bool {
        condition == object_type || self.schema.is_possible_type(condition, object_type)
    }

    fn should_include(&self, directives: &[ast::Directive]) -> bool {
        !directives.iter().any(|directive| match directive.name.as_str() {
            "skip" => self.directive_condition(directive) == Some(true),
            "include" => self.directive_condition(directive) == Some(false),
            _ => false,
        })
    }

    /// The coerced `if:` argument of `@skip` or `@include`. `None` when it
    /// is missing or not a boolean, in which case the directive is ignored.
    fn directive_condition(&self, directive: &ast::Directive) -> Option<bool> {
        let arg = directive.argument("if")?;
        coerce_argument_value(
            &arg.value,
            &TypeAnnotation::named("Boolean", false),
            self.variables,
            self.var_types,
            self.schema,
        )
        .ok()?
        .as_bool()
    }
}
