use crate::validation::ValidationContext;
use crate::validation::argument_rules;
use crate::validation::argument_rules::ArgumentOwner;
use gqlengine_parser::ast::Directive;
use gqlengine_parser::ast::Selection;

/// `KnownDirectives`, plus the argument rules for every directive use in
/// the document.
pub(crate) fn known_directives(ctx: &mut ValidationContext) {
    let document = ctx.document;
    for op in &document.operations {
        check_directives(ctx, &op.directives);
        for var_def in &op.variables {
            check_directives(ctx, &var_def.directives);
        }
        check_selection_directives(ctx, &op.selections);
    }
    for fragment in document.fragments.iter() {
        check_directives(ctx, &fragment.directives);
        check_selection_directives(ctx, &fragment.selections);
    }
}

fn check_selection_directives(ctx: &mut ValidationContext, selections: &[Selection]) {
    for selection in selections {
        check_directives(ctx, selection.directives());
        match selection {
            Selection::Field(field) => check_selection_directives(ctx, &field.selections),
            Selection::InlineFragment(inline) => check_selection_directives(ctx, &inline.selections),
            Selection::FragmentSpread(_) => (),
        }
    }
}

fn check_directives(ctx: &mut ValidationContext, directives: &[Directive]) {
    let schema = ctx.schema;
    for directive in directives {
        let name = directive.name.as_str();
        match schema.directive(name) {
            None => ctx.report(
                "KnownDirectives",
                format!("Unknown directive \"@{name}\"."),
                [directive.location],
            ),
            Some(def) => argument_rules::check_arguments(
                ctx,
                ArgumentOwner::Directive(name),
                def.parameters(),
                &directive.arguments,
                directive.location,
            ),
        }
    }
}
