use crate::validation::ValidationContext;
use gqlengine_parser::ast::OperationKind;
use std::collections::HashMap;

pub(crate) fn unique_operation_names(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let mut seen = HashMap::new();
    for op in &document.operations {
        let Some(name) = &op.name else {
            continue;
        };
        match seen.get(name.as_str()) {
            Some(first_loc) => {
                let locations = [*first_loc, name.location];
                ctx.report(
                    "UniqueOperationNames",
                    format!("There can be only one operation named \"{name}\"."),
                    locations,
                );
            },
            None => {
                seen.insert(name.as_str(), name.location);
            },
        }
    }
}

pub(crate) fn lone_anonymous_operation(ctx: &mut ValidationContext) {
    let document = ctx.document;
    if document.operations.len() < 2 {
        return;
    }
    for op in &document.operations {
        if op.name.is_none() {
            ctx.report(
                "LoneAnonymousOperation",
                "This anonymous operation must be the only defined operation.",
                [op.location],
            );
        }
    }
}

pub(crate) fn known_operation_types(ctx: &mut ValidationContext) {
    let document = ctx.document;
    for op in &document.operations {
        if ctx.schema.root_operation_type(op.kind).is_some() {
            continue;
        }
        let kind = match op.kind {
            OperationKind::Query => "queries",
            OperationKind::Mutation => "mutations",
            OperationKind::Subscription => "subscriptions",
        };
        ctx.report(
            "KnownOperationTypes",
            format!("Schema is not configured for {kind}."),
            [op.location],
        );
    }
}
