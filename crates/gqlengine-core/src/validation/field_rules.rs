use crate::validation::FieldBinding;
use crate::validation::ValidationContext;
use crate::validation::argument_rules;
use crate::validation::argument_rules::ArgumentOwner;
use gqlengine_parser::ast;
use gqlengine_parser::ast::Selection;

/// Walks every selection tree with its static parent type, running
/// `FieldsOnCorrectType` (which fills the binding table), `ScalarLeafs`,
/// the field argument rules, and the type-condition rules for inline
/// fragments.
///
/// Each fragment declaration is walked once on its own type condition;
/// spreads are not followed.
pub(crate) fn check_fields(ctx: &mut ValidationContext) {
    let document = ctx.document;
    let schema = ctx.schema;
    for op in &document.operations {
        if let Some(root_type) = schema.root_operation_type(op.kind) {
            visit_selections(ctx, root_type.name(), &op.selections);
        }
    }
    for fragment in document.fragments.iter() {
        if let Some(cond_type) = schema.lookup_type(fragment.type_condition.as_str())
            && cond_type.is_composite()
        {
            visit_selections(ctx, cond_type.name(), &fragment.selections);
        }
    }
}

fn visit_selections<'schema, 'doc>(
    ctx: &mut ValidationContext<'schema, 'doc>,
    parent_type: &'schema str,
    selections: &'doc [Selection],
) {
    let schema = ctx.schema;
    for selection in selections {
        match selection {
            Selection::Field(field) => visit_field(ctx, parent_type, field),

            Selection::InlineFragment(inline) => {
                let type_name = match &inline.type_condition {
                    None => parent_type,
                    Some(cond) => match schema.lookup_type(cond.as_str()) {
                        None => {
                            ctx.report(
                                "KnownTypeNames",
                                format!("Unknown type \"{cond}\"."),
                                [cond.location],
                            );
                            continue;
                        },
                        Some(cond_type) if !cond_type.is_composite() => {
                            ctx.report(
                                "FragmentsOnCompositeTypes",
                                format!("Fragment cannot condition on non composite type \"{cond}\"."),
                                [cond.location],
                            );
                            continue;
                        },
                        Some(cond_type) => cond_type.name(),
                    },
                };
                visit_selections(ctx, type_name, &inline.selections);
            },

            Selection::FragmentSpread(_) => (),
        }
    }
}

fn visit_field<'schema, 'doc>(
    ctx: &mut ValidationContext<'schema, 'doc>,
    parent_type: &'schema str,
    field: &'doc ast::Field,
) {
    let schema = ctx.schema;
    let field_name = field.name.as_str();
    let Some(schema_field) = schema.field(parent_type, field_name) else {
        ctx.report(
            "FieldsOnCorrectType",
            format!("Cannot query field \"{field_name}\" on type \"{parent_type}\"."),
            [field.location()],
        );
        return;
    };
    ctx.bindings.insert(field.id, FieldBinding {
        parent_type,
        field: schema_field,
    });

    argument_rules::check_arguments(
        ctx,
        ArgumentOwner::Field {
            field_name,
            parent_type,
        },
        schema_field.parameters(),
        &field.arguments,
        field.location(),
    );

    let type_annot = schema_field.type_annotation();
    let Some(field_type) = schema.lookup_type(type_annot.innermost_type_name()) else {
        return;
    };
    if field_type.is_leaf() {
        if !field.selections.is_empty() {
            ctx.report(
                "ScalarLeafs",
                format!(
                    "Field \"{field_name}\" must not have a selection since type \"{type_annot}\" \
                    has no subfields.",
                ),
                [field.selection_set_location.unwrap_or(field.location())],
            );
        }
    } else if field.selections.is_empty() {
        ctx.report(
            "ScalarLeafs",
            format!(
                "Field \"{field_name}\" of type \"{type_annot}\" must have a selection of \
                subfields. Did you mean \"{field_name} {{ ... }}\"?",
            ),
            [field.location()],
        );
    } else {
        visit_selections(ctx, field_type.name(), &field.selections);
    }
}
