use crate::TypeResolutionError;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::validation::ValidationContext;
use gqlengine_parser::Location;
use gqlengine_parser::ast::Argument;
use gqlengine_parser::ast::Directive;
use gqlengine_parser::ast::Name;
use gqlengine_parser::ast::Operation;
use gqlengine_parser::ast::Selection;
use gqlengine_parser::ast::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;

pub(crate) fn unique_variable_names(ctx: &mut ValidationContext) {
    let document = ctx.document;
    for op in &document.operations {
        let mut seen = HashMap::new();
        for var_def in &op.variables {
            let name = &var_def.name;
            match seen.get(name.as_str()) {
                Some(first_loc) => {
                    let locations = [*first_loc, var_def.location];
                    ctx.report(
                        "UniqueVariableNames",
                        format!("There can be only one variable named \"${name}\"."),
                        locations,
                    );
                },
                None => {
                    seen.insert(name.as_str(), var_def.location);
                },
            }
        }
    }
}

/// `KnownTypeNames` and `VariablesAreInputTypes` for variable definitions.
pub(crate) fn variable_types(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let schema = ctx.schema;
    for op in &document.operations {
        for var_def in &op.variables {
            match schema.resolve_type_annotation(&var_def.var_type) {
                Ok(_) => (),
                Err(err @ TypeResolutionError::UnknownType { .. }) =>
                    ctx.report("KnownTypeNames", err.to_string(), [err.location()]),
                Err(TypeResolutionError::NotAnInputType { type_name, location }) => ctx.report(
                    "VariablesAreInputTypes",
                    format!(
                        "Variable \"${}\" cannot be non-input type \"{type_name}\".",
                        var_def.name,
                    ),
                    [location],
                ),
            }
        }
    }
}

pub(crate) fn no_undefined_variables(ctx: &mut ValidationContext) {
    let document = ctx.document;
    for op in &document.operations {
        let defined: HashSet<&str> = op.variables.iter().map(|v| v.name.as_str()).collect();
        let mut reported = HashSet::new();
        for usage in variable_usages(ctx, op) {
            if defined.contains(usage.as_str()) || !reported.insert(usage.as_str()) {
                continue;
            }
            let message = match &op.name {
                Some(op_name) =>
                    format!("Variable \"${usage}\" is not defined by operation \"{op_name}\"."),
                None => format!("Variable \"${usage}\" is not defined."),
            };
            ctx.report("NoUndefinedVariables", message, [usage.location, op.location]);
        }
    }
}

pub(crate) fn no_unused_variables(ctx: &mut ValidationContext) {
    let document = ctx.document;
    for op in &document.operations {
        let used: HashSet<&str> = variable_usages(ctx, op).into_iter().map(Name::as_str).collect();
        for var_def in &op.variables {
            if used.contains(var_def.name.as_str()) {
                continue;
            }
            let message = match &op.name {
                Some(op_name) => format!(
                    "Variable \"${}\" is never used in operation \"{op_name}\".",
                    var_def.name,
                ),
                None => format!("Variable \"${}\" is never used.", var_def.name),
            };
            ctx.report("NoUnusedVariables", message, [var_def.location]);
        }
    }
}

/// `VariablesInAllowedPosition`: each variable must fit every position it is
/// used in. A nullable variable may fill a non-null position only when it
/// has a non-null default or the position itself has a default.
pub(crate) fn variables_in_allowed_position(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let schema = ctx.schema;
    let mut violations = vec![];
    for op in &document.operations {
        let mut declared = HashMap::new();
        for var_def in &op.variables {
            let Ok(annot) = schema.resolve_type_annotation(&var_def.var_type) else {
                continue;
            };
            declared.entry(var_def.name.as_str()).or_insert(DeclaredVariable {
                annot,
                has_non_null_default: var_def
                    .default_value
                    .as_ref()
                    .is_some_and(|v| !matches!(v, Value::Null)),
                location: var_def.location,
            });
        }
        if declared.is_empty() {
            continue;
        }

        let mut positions = PositionCollector {
            ctx: &*ctx,
            found: vec![],
        };
        positions.directives(&op.directives);
        positions.selections(&op.selections);
        for fragment in ctx.reachable_fragments(&op.selections) {
            positions.directives(&fragment.directives);
            positions.selections(&fragment.selections);
        }

        for usage in positions.found {
            let Some(var) = declared.get(usage.name.as_str()) else {
                continue;
            };
            if !allowed_in_position(var, &usage) {
                violations.push((
                    format!(
                        "Variable \"${}\" of type \"{}\" used in position expecting type \"{}\".",
                        usage.name, var.annot, usage.expected,
                    ),
                    [var.location, usage.name.location],
                ));
            }
        }
    }

    for (message, locations) in violations {
        ctx.report("VariablesInAllowedPosition", message, locations);
    }
}

struct DeclaredVariable {
    annot: TypeAnnotation,
    has_non_null_default: bool,
    location: Location,
}

/// A variable reference and the type of the input position it fills.
struct VariableUsage<'doc> {
    name: &'doc Name,
    expected: TypeAnnotation,
    position_has_default: bool,
}

fn allowed_in_position(var: &DeclaredVariable, usage: &VariableUsage) -> bool {
    if !usage.expected.is_nullable() && var.annot.is_nullable() {
        return (var.has_non_null_default || usage.position_has_default)
            && is_subtype(&var.annot, &usage.expected.as_nullable());
    }
    is_subtype(&var.annot, &usage.expected)
}

/// Whether a value of type `sub` can always be used where `sup` is
/// expected. Input types only relate through nullability and lists.
fn is_subtype(sub: &TypeAnnotation, sup: &TypeAnnotation) -> bool {
    if sub.is_nullable() && !sup.is_nullable() {
        return false;
    }
    match (sub, sup) {
        (TypeAnnotation::Named { type_name: a, .. }, TypeAnnotation::Named { type_name: b, .. }) => a == b,
        (TypeAnnotation::List { inner: a, .. }, TypeAnnotation::List { inner: b, .. }) => is_subtype(a, b),
        _ => false,
    }
}

/// Walks arguments with the schema types they are coerced to, recording
/// each variable found along with the type expected at that spot.
struct PositionCollector<'ctx, 'schema, 'doc> {
    ctx: &'ctx ValidationContext<'schema, 'doc>,
    found: Vec<VariableUsage<'doc>>,
}

impl<'doc> PositionCollector<'_, '_, 'doc> {
    fn selections(&mut self, selections: &'doc [Selection]) {
        for selection in selections {
            self.directives(selection.directives());
            match selection {
                Selection::Field(field) => {
                    if let Some(binding) = self.ctx.bindings.get(field.id) {
                        self.arguments(binding.field.parameters(), &field.arguments);
                    }
                    self.selections(&field.selections);
                },
                Selection::InlineFragment(inline) => self.selections(&inline.selections),
                Selection::FragmentSpread(_) => (),
            }
        }
    }

    fn directives(&mut self, directives: &'doc [Directive]) {
        for directive in directives {
            if let Some(def) = self.ctx.schema.directive(directive.name.as_str()) {
                self.arguments(def.parameters(), &directive.arguments);
            }
        }
    }

    fn arguments(&mut self, params: &IndexMap<String, Parameter>, args: &'doc [Argument]) {
        for arg in args {
            if let Some(param) = params.get(arg.name.as_str()) {
                self.value(&arg.value, param.type_annotation(), param.default_value().is_some());
            }
        }
    }

    fn value(&mut self, value: &'doc Value, expected: &TypeAnnotation, position_has_default: bool) {
        match value {
            Value::Variable(name) => self.found.push(VariableUsage {
                name,
                expected: expected.clone(),
                position_has_default,
            }),
            Value::List(items) => {
                let item_type = expected.list_inner().unwrap_or(expected);
                for item in items {
                    self.value(item, item_type, false);
                }
            },
            Value::Object(fields) => {
                let schema = self.ctx.schema;
                let Some(input) = schema
                    .lookup_type(expected.innermost_type_name())
                    .and_then(GraphQLType::as_input_object)
                else {
                    return;
                };
                for field in fields {
                    if let Some(def) = input.fields().get(field.name.as_str()) {
                        self.value(&field.value, def.type_annotation(), def.default_value().is_some());
                    }
                }
            },
            _ => (),
        }
    }
}

/// Every variable reference an operation makes, directly or through the
/// fragments it spreads, in the order they are found.
fn variable_usages<'doc>(ctx: &ValidationContext<'_, 'doc>, op: &'doc Operation) -> Vec<&'doc Name> {
    let mut usages = vec![];
    collect_directive_usages(&op.directives, &mut usages);
    collect_selection_usages(&op.selections, &mut usages);
    for fragment in ctx.reachable_fragments(&op.selections) {
        collect_directive_usages(&fragment.directives, &mut usages);
        collect_selection_usages(&fragment.selections, &mut usages);
    }
    usages
}

fn collect_selection_usages<'doc>(selections: &'doc [Selection], usages: &mut Vec<&'doc Name>) {
    for selection in selections {
        collect_directive_usages(selection.directives(), usages);
        match selection {
            Selection::Field(field) => {
                for arg in &field.arguments {
                    arg.value.for_each_variable(&mut |name| usages.push(name));
                }
                collect_selection_usages(&field.selections, usages);
            },
            Selection::InlineFragment(inline) => collect_selection_usages(&inline.selections, usages),
            Selection::FragmentSpread(_) => (),
        }
    }
}

fn collect_directive_usages<'doc>(directives: &'doc [Directive], usages: &mut Vec<&'doc Name>) {
    for directive in directives {
        for arg in &directive.arguments {
            arg.value.for_each_variable(&mut |name| usages.push(name));
        }
    }
}
