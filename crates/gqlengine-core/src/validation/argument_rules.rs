use crate::types::Parameter;
use crate::validation::ValidationContext;
use gqlengine_parser::Location;
use gqlengine_parser::ast::Argument;
use indexmap::IndexMap;
use std::collections::HashMap;

/// What an argument list belongs to, for error messages.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ArgumentOwner<'a> {
    Field {
        field_name: &'a str,
        parent_type: &'a str,
    },
    Directive(&'a str),
}

/// Runs `UniqueArgumentNames`, `KnownArgumentNames` and
/// `ProvidedRequiredArguments` over one argument list.
pub(crate) fn check_arguments(
    ctx: &mut ValidationContext,
    owner: ArgumentOwner,
    params: &IndexMap<String, Parameter>,
    args: &[Argument],
    owner_location: Location,
) {
    let mut seen: HashMap<&str, Location> = HashMap::new();
    for arg in args {
        let name = arg.name.as_str();
        if let Some(first_loc) = seen.get(name) {
            let locations = [*first_loc, arg.location()];
            ctx.report(
                "UniqueArgumentNames",
                format!("There can be only one argument named \"{name}\"."),
                locations,
            );
            continue;
        }
        seen.insert(name, arg.location());

        if !params.contains_key(name) {
            let message = match owner {
                ArgumentOwner::Field { field_name, parent_type } => format!(
                    "Unknown argument \"{name}\" on field \"{field_name}\" of type \"{parent_type}\".",
                ),
                ArgumentOwner::Directive(directive_name) =>
                    format!("Unknown argument \"{name}\" on directive \"@{directive_name}\"."),
            };
            ctx.report("KnownArgumentNames", message, [arg.location()]);
        }
    }

    for param in params.values() {
        if !param.is_required() || seen.contains_key(param.name()) {
            continue;
        }
        let message = match owner {
            ArgumentOwner::Field { field_name, .. } => format!(
                "Field \"{field_name}\" argument \"{}\" of type \"{}\" is required but not provided.",
                param.name(),
                param.type_annotation(),
            ),
            ArgumentOwner::Directive(directive_name) => format!(
                "Directive \"@{directive_name}\" argument \"{}\" of type \"{}\" is required but not provided.",
                param.name(),
                param.type_annotation(),
            ),
        };
        ctx.report("ProvidedRequiredArguments", message, [owner_location]);
    }
}
