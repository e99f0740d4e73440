use crate::QueryError;
use crate::Schema;
use crate::validation::FieldBindings;
use crate::validation::ValidationOutcome;
use gqlengine_parser::Location;
use gqlengine_parser::ast::Document;
use gqlengine_parser::ast::FragmentDecl;
use gqlengine_parser::ast::Name;
use gqlengine_parser::ast::Selection;
use std::collections::HashSet;

/// Shared state threaded through every validation rule.
pub(crate) struct ValidationContext<'schema, 'doc> {
    pub schema: &'schema Schema,
    pub document: &'doc Document,
    pub max_depth: usize,
    pub bindings: FieldBindings<'schema>,

    /// Fragments that take part in a spread cycle. Rules that follow
    /// spreads stop at these.
    pub cyclic_fragments: HashSet<&'doc str>,

    errors: Vec<QueryError>,
}

impl<'schema, 'doc> ValidationContext<'schema, 'doc> {
    pub fn new(schema: &'schema Schema, document: &'doc Document, max_depth: usize) -> Self {
        Self {
            schema,
            document,
            max_depth,
            bindings: FieldBindings::with_capacity(document.field_count()),
            cyclic_fragments: HashSet::new(),
            errors: vec![],
        }
    }

    pub fn report(
        &mut self,
        rule: &'static str,
        message: impl Into<String>,
        locations: impl IntoIterator<Item = Location>,
    ) {
        self.errors.push(QueryError::validation(rule, message).with_locations(locations));
    }

    pub fn fragment(&self, name: &str) -> Option<&'doc FragmentDecl> {
        self.document.fragment(name)
    }

    /// Calls `f` with every fragment spread reachable from `selections`
    /// without leaving the current selection tree: nested fields and inline
    /// fragments are searched, spread fragments are not.
    pub fn for_each_direct_spread(selections: &'doc [Selection], f: &mut impl FnMut(&'doc Name)) {
        for selection in selections {
            match selection {
                Selection::Field(field) => Self::for_each_direct_spread(&field.selections, f),
                Selection::InlineFragment(inline) =>
                    Self::for_each_direct_spread(&inline.selections, f),
                Selection::FragmentSpread(spread) => f(&spread.fragment_name),
            }
        }
    }

    /// Every declared fragment reachable from `selections`, following
    /// spreads transitively. Each fragment is listed once.
    pub fn reachable_fragments(&self, selections: &'doc [Selection]) -> Vec<&'doc FragmentDecl> {
        let mut seen = HashSet::new();
        let mut found = vec![];
        let mut pending = vec![selections];
        while let Some(selections) = pending.pop() {
            Self::for_each_direct_spread(selections, &mut |name| {
                if seen.insert(name.as_str())
                    && let Some(fragment) = self.fragment(name.as_str())
                {
                    found.push(fragment);
                    pending.push(&fragment.selections);
                }
            });
        }
        found
    }

    pub fn into_outcome(self) -> ValidationOutcome<'schema> {
        ValidationOutcome {
            errors: self.errors,
            bindings: self.bindings,
        }
    }
}
